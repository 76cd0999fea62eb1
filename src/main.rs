use anyhow::{bail, Context};
use clap::Parser;
use dialoguer::{Input, Select};
use heritage_admin::api::{HttpVisitApi, VisitApi};
use heritage_admin::cli::{Cli, Commands, OverrideAction};
use heritage_admin::config::Config;
use heritage_admin::confirm::{Confirmer, FixedAnswer, TerminalConfirmer};
use heritage_admin::error::AdminError;
use heritage_admin::export::{export_visit, ExportOptions};
use heritage_admin::file_store::FileStore;
use heritage_admin::store::{RecordStore, RowOutcome};
use heritage_admin::listing::{self, PendingRefresh};
use heritage_admin::{auth, logging, report};
use heritage_common::export::REPORT_TITLE;
use heritage_common::sections::{default_labels, default_titles, galleries};
use heritage_common::{
    render_detail, CacheLookup, DetailBlock, DetailView, EditMode, KvStore, LabelEditor,
    LabelKind, LabelOverrides, LabelTarget, ListCache, ListView, RenderContext, RotateDirection,
    RotationState, VisitDetail, VisitSummary,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

struct App {
    config: Config,
    api: Arc<HttpVisitApi>,
    /// ラベル・タイトル・回転・トークン
    store: FileStore,
    /// 一覧キャッシュ
    session: FileStore,
}

fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

fn timestamp() -> String {
    chrono::Utc::now().format("%Y-%m-%d %H:%M UTC").to_string()
}

impl App {
    fn new() -> anyhow::Result<Self> {
        let config = Config::load().context("設定の読み込みに失敗しました")?;
        let api = Arc::new(HttpVisitApi::from_config(&config)?);
        let store = FileStore::persistent()?;
        let session = FileStore::session()?;
        debug!("store: {}, session: {}", store.path().display(), session.path().display());
        Ok(Self {
            config,
            api,
            store,
            session,
        })
    }

    /// 一覧を取得。鮮度切れのキャッシュは即座に返し、裏で再取得する
    async fn load_visits(
        &self,
        refresh: bool,
    ) -> anyhow::Result<(Vec<VisitSummary>, Option<PendingRefresh>)> {
        let api: Arc<dyn VisitApi> = self.api.clone();
        Ok(listing::load_for_display(api, &self.session, refresh, now_ms()).await?)
    }

    /// 行操作用の一覧（期限切れなら取り直す）
    async fn load_for_mutation(&self) -> anyhow::Result<RecordStore> {
        let visits = listing::load_for_mutation(self.api.as_ref(), &self.session, now_ms()).await?;
        Ok(RecordStore::new(visits))
    }

    /// 行操作の後、キャッシュを書き換える
    fn rewrite_cache(&self, visits: &[VisitSummary]) -> anyhow::Result<()> {
        ListCache::new(&self.session).store(visits, now_ms())?;
        Ok(())
    }

    async fn load_detail(&self, id: i64) -> anyhow::Result<VisitDetail> {
        let visit = self.api.get_visit(id).await?.ok_or(AdminError::NotFound(id))?;
        Ok(visit)
    }

    fn render(&self, visit: &VisitDetail) -> DetailView {
        let labels = LabelOverrides::load(&self.store, LabelKind::Field);
        let titles = LabelOverrides::load(&self.store, LabelKind::Title);
        let rotations = RotationState::load(&self.store, visit.id);
        render_detail(
            visit,
            &RenderContext {
                labels: &labels,
                titles: &titles,
                rotations: &rotations,
                media_base: &self.config.base_url,
            },
        )
    }
}

fn confirmer(yes: bool) -> Box<dyn Confirmer> {
    if yes {
        Box::new(FixedAnswer(true))
    } else {
        Box::new(TerminalConfirmer)
    }
}

fn report_outcome(outcome: RowOutcome, done_message: String) -> anyhow::Result<()> {
    match outcome {
        RowOutcome::Done => println!("✔ {}", done_message),
        RowOutcome::Declined => println!("- キャンセルしました"),
        RowOutcome::Busy => println!("- 処理中です"),
        RowOutcome::Failed(message) => bail!(message),
    }
    Ok(())
}

/// 詳細表示中のラベル・タイトル編集（Enterで確定、Escで終了）
fn edit_labels(app: &App, visit: &VisitDetail) -> anyhow::Result<()> {
    let mut labels = LabelOverrides::load(&app.store, LabelKind::Field);
    let mut titles = LabelOverrides::load(&app.store, LabelKind::Title);
    let mut editor = LabelEditor::default();
    let mut mode = EditMode::default();
    mode.toggle();

    loop {
        let view = app.render(visit);
        let mut targets = Vec::new();
        let mut items = Vec::new();
        for block in &view.blocks {
            match block {
                DetailBlock::Info(info) => {
                    targets.push(LabelTarget::title(info.default_title));
                    items.push(format!("§ {}", info.title));
                    for row in &info.rows {
                        targets.push(LabelTarget::field(row.default_label));
                        items.push(format!("    {}", row.label));
                    }
                }
                DetailBlock::Gallery(gallery) => {
                    targets.push(LabelTarget::title(gallery.default_title));
                    items.push(format!("§ {}", gallery.title));
                }
            }
        }
        items.push(mode.button_text().to_string());

        let choice = Select::new()
            .with_prompt("編集するラベルを選択（Escで終了）")
            .items(&items)
            .default(0)
            .interact_opt()
            .map_err(|e| AdminError::Prompt(e.to_string()))?;
        let Some(target) = choice.and_then(|i| targets.get(i).cloned()) else {
            break;
        };

        let current = match target.kind {
            LabelKind::Field => labels.display(&target.default_label).to_string(),
            LabelKind::Title => titles.display(&target.default_label).to_string(),
        };
        editor.begin(target, &current);
        let text: String = Input::new()
            .with_prompt("表示名（そのままEnterで取り消し）")
            .with_initial_text(current)
            .allow_empty(true)
            .interact_text()
            .map_err(|e| AdminError::Prompt(e.to_string()))?;
        editor.input(&text);
        if editor.is_unchanged() {
            editor.cancel();
            println!("- 変更なし");
        } else if let Some(saved) = editor.commit(&app.store, &mut labels, &mut titles)? {
            println!("✔ {} → {}", saved.default_label, text);
        }
    }

    mode.toggle();
    Ok(())
}

fn list_overrides(store: &dyn KvStore, kind: LabelKind, all: bool) {
    let overrides = LabelOverrides::load(store, kind);
    if all {
        let defaults = match kind {
            LabelKind::Field => default_labels(),
            LabelKind::Title => default_titles(),
        };
        for default in defaults {
            match overrides.get(default) {
                Some(text) => println!("{} → {}", default, text),
                None => println!("{}", default),
            }
        }
    } else if overrides.is_empty() {
        println!("上書きはありません");
    } else {
        for (default, text) in overrides.entries() {
            println!("{} → {}", default, text);
        }
    }
}

fn set_override(store: &dyn KvStore, kind: LabelKind, default: &str, text: &str) -> anyhow::Result<()> {
    let known = match kind {
        LabelKind::Field => default_labels(),
        LabelKind::Title => default_titles(),
    };
    if !known.iter().any(|k| *k == default) {
        bail!("既定の名前ではありません: {}", default);
    }
    let mut overrides = LabelOverrides::load(store, kind);
    overrides.set(store, default, text)?;
    println!("✔ {} → {}", default, overrides.display(default));
    Ok(())
}

/// ギャラリー名（既定タイトルまたは表示タイトル）を既定タイトルに解決
fn resolve_gallery(store: &dyn KvStore, name: &str) -> Option<&'static str> {
    let titles = LabelOverrides::load(store, LabelKind::Title);
    galleries()
        .find(|g| g.title == name)
        .or_else(|| galleries().find(|g| titles.display(g.title) == name))
        .map(|g| g.title)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let app = App::new()?;

    match cli.command {
        Commands::List { search, page, refresh } => {
            let (visits, pending) = app.load_visits(refresh).await?;

            let mut view = ListView::new(&visits);
            view.set_query(&visits, &search);
            view.pager_mut().go_to(page);
            print!("{}", report::render_list(&view, &visits, None));

            if let Some(handle) = pending {
                match handle.await.context("一覧の再取得に失敗しました")? {
                    Ok(fresh) => {
                        app.rewrite_cache(&fresh)?;
                        info!("list cache refreshed ({} visits)", fresh.len());
                        if fresh != visits {
                            println!("\n- 一覧が更新されました。再表示してください");
                        }
                    }
                    Err(e) => eprintln!("一覧の再取得に失敗しました: {}", e),
                }
            }
        }

        Commands::Show { id, edit_labels: edit } => {
            auth::require_token(&app.store)?;
            let visit = app.load_detail(id).await?;
            print!("{}", report::render_detail_text(&app.render(&visit)));
            if edit {
                println!();
                edit_labels(&app, &visit)?;
                print!("\n{}", report::render_detail_text(&app.render(&visit)));
            }
        }

        Commands::Print { id, output } => {
            auth::require_token(&app.store)?;
            let visit = app.load_detail(id).await?;
            let text = report::render_print_text(&app.render(&visit), REPORT_TITLE, &timestamp());
            match output {
                Some(path) => {
                    std::fs::write(&path, text)?;
                    println!("✔ 印刷用テキスト: {}", path.display());
                }
                None => print!("{}", text),
            }
        }

        Commands::Delete { id, yes } => {
            let records = app.load_for_mutation().await?;
            let outcome = records
                .delete(app.api.as_ref(), confirmer(yes).as_ref(), id)
                .await;
            if outcome == RowOutcome::Done {
                app.rewrite_cache(&records.visits())?;
            }
            report_outcome(outcome, format!("訪問 #{} を削除しました", id))?;
        }

        Commands::Confirm { id, unset, yes } => {
            let records = app.load_for_mutation().await?;
            let value = !unset;
            let outcome = records
                .set_confirmation(app.api.as_ref(), confirmer(yes).as_ref(), id, value)
                .await;
            if outcome == RowOutcome::Done {
                app.rewrite_cache(&records.visits())?;
            }
            let state = if value { "承認済み" } else { "未承認" };
            report_outcome(outcome, format!("訪問 #{} を{}にしました", id, state))?;
        }

        Commands::Export { id, output, format, pdf_quality } => {
            let token = auth::require_token(&app.store)?;
            println!("📄 heritage-admin - エクスポート\n");

            let visit = app.load_detail(id).await?;
            let view = app.render(&visit);
            let quality = pdf_quality.unwrap_or(app.config.pdf_quality);
            println!(
                "- {}件の画像ギャラリー, {}枚 (品質: {})",
                view.galleries().count(),
                view.image_count(),
                quality
            );

            let options = ExportOptions {
                format,
                quality,
                output: output.unwrap_or_else(|| PathBuf::from(".")),
                show_progress: true,
            };
            let path = export_visit(app.api.as_ref(), &view, &token, &timestamp(), &options)
                .await
                .context("エクスポートに失敗しました")?;
            println!("✔ 出力: {}", path.display());
        }

        Commands::Rotate { id, section, index, left } => {
            let Some(gallery) = resolve_gallery(&app.store, &section) else {
                bail!("ギャラリーが見つかりません: {}", section);
            };
            if index == 0 {
                bail!("画像番号は1から指定してください");
            }
            let direction = if left { RotateDirection::Left } else { RotateDirection::Right };
            let mut rotations = RotationState::load(&app.store, id);
            let angle = rotations.rotate_and_save(&app.store, gallery, index - 1, direction)?;
            println!("✔ 訪問 #{} {} {} → {}°", id, gallery, index, angle);
        }

        Commands::Labels { action } => match action {
            OverrideAction::List { all } => list_overrides(&app.store, LabelKind::Field, all),
            OverrideAction::Set { default, text } => {
                set_override(&app.store, LabelKind::Field, &default, &text)?
            }
        },

        Commands::Titles { action } => match action {
            OverrideAction::List { all } => list_overrides(&app.store, LabelKind::Title, all),
            OverrideAction::Set { default, text } => {
                set_override(&app.store, LabelKind::Title, &default, &text)?
            }
        },

        Commands::Login { token } => {
            auth::login(&app.store, &token)?;
            println!("✔ トークンを保存しました");
        }

        Commands::Logout => {
            auth::logout(&app.store)?;
            println!("✔ トークンを削除しました");
        }

        Commands::Cache { clear, info } => {
            let cache = ListCache::new(&app.session);
            if clear {
                cache.clear()?;
                println!("✔ 一覧キャッシュを削除しました");
            }
            if info || !clear {
                match (cache.lookup(now_ms()), cache.age_ms(now_ms())) {
                    (CacheLookup::Missing, _) | (_, None) => println!("一覧キャッシュ: なし"),
                    (lookup, Some(age)) => {
                        let state = if lookup.needs_refresh() { "期限切れ" } else { "有効" };
                        let count = lookup.visits().map(|v| v.len()).unwrap_or(0);
                        println!("一覧キャッシュ: {}件 ({}秒前, {})", count, age / 1000, state);
                    }
                }
            }
        }

        Commands::Config { set_base_url, show } => {
            let show = show || set_base_url.is_none();
            let mut config = app.config.clone();
            if let Some(url) = set_base_url {
                config.set_base_url(url)?;
                println!("✔ ベースURLを設定しました: {}", config.base_url);
            }
            if show {
                println!("{}", serde_json::to_string_pretty(&config)?);
                println!("設定ファイル: {}", Config::config_path()?.display());
            }
        }
    }

    Ok(())
}
