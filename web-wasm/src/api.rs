//! ブラウザのfetchによるAPI呼び出し

use heritage_common::export::FetchedImage;
use heritage_common::{Envelope, VisitDetail, VisitSummary, DEFAULT_MEDIA_BASE};
use serde::de::DeserializeOwned;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

/// APIのベースURL（画像の相対URLにも使う）
pub const API_BASE: &str = DEFAULT_MEDIA_BASE;

fn proxy_url() -> String {
    format!("{}/api/proxy-image", API_BASE)
}

fn js_error(e: JsValue) -> String {
    e.as_string().unwrap_or_else(|| format!("{:?}", e))
}

async fn send(
    method: &str,
    url: &str,
    body: Option<String>,
    token: Option<&str>,
) -> Result<Response, String> {
    let opts = RequestInit::new();
    opts.set_method(method);
    opts.set_mode(RequestMode::Cors);
    if let Some(body) = body.as_deref() {
        opts.set_body(&JsValue::from_str(body));
    }

    let request = Request::new_with_str_and_init(url, &opts).map_err(js_error)?;
    request
        .headers()
        .set("Content-Type", "application/json")
        .map_err(js_error)?;
    if let Some(token) = token {
        request
            .headers()
            .set("Authorization", &format!("Bearer {}", token))
            .map_err(js_error)?;
    }

    let window = web_sys::window().ok_or("window is not available")?;
    let value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(js_error)?;
    value.dyn_into::<Response>().map_err(js_error)
}

/// 2xx以外は "Failed to <action>"
fn ensure_ok(resp: &Response, action: &str) -> Result<(), String> {
    if resp.ok() {
        Ok(())
    } else {
        web_sys::console::warn_1(&format!("{} failed: {}", action, resp.status()).into());
        Err(format!("Failed to {}", action))
    }
}

async fn read_json<T: DeserializeOwned>(resp: Response) -> Result<T, String> {
    let text = JsFuture::from(resp.text().map_err(js_error)?)
        .await
        .map_err(js_error)?
        .as_string()
        .unwrap_or_default();
    serde_json::from_str(&text).map_err(|e| e.to_string())
}

pub async fn list_visits() -> Result<Vec<VisitSummary>, String> {
    let resp = send("GET", &format!("{}/api/visits", API_BASE), None, None).await?;
    ensure_ok(&resp, "fetch visits")?;
    let envelope: Envelope<Vec<VisitSummary>> = read_json(resp).await?;
    Ok(envelope.data)
}

/// 詳細取得。該当なしは None
pub async fn get_visit(id: i64) -> Result<Option<VisitDetail>, String> {
    let url = format!("{}/api/visits/?filters[id]={}&populate=*", API_BASE, id);
    let resp = send("GET", &url, None, None).await?;
    ensure_ok(&resp, "fetch visit")?;
    let envelope: Envelope<Option<Vec<VisitDetail>>> = read_json(resp).await?;
    Ok(envelope.data.and_then(|items| items.into_iter().next()))
}

pub async fn set_confirmation(id: i64, confirmed: bool) -> Result<VisitSummary, String> {
    let body = serde_json::json!({ "data": { "Confirmation": confirmed } }).to_string();
    let url = format!("{}/api/visits/{}", API_BASE, id);
    let resp = send("PUT", &url, Some(body), None).await?;
    ensure_ok(&resp, "update confirmation")?;
    let envelope: Envelope<VisitSummary> = read_json(resp).await?;
    Ok(envelope.data)
}

pub async fn delete_visit(id: i64) -> Result<(), String> {
    let url = format!("{}/api/visits/{}", API_BASE, id);
    let resp = send("DELETE", &url, None, None).await?;
    ensure_ok(&resp, "delete visit")
}

/// 画像プロキシ経由で取得（CORS回避）
pub async fn fetch_image(url: &str, token: &str) -> Result<FetchedImage, String> {
    let encoded: String = js_sys::encode_uri_component(url).into();
    let proxy = format!("{}?url={}", proxy_url(), encoded);
    let resp = send("GET", &proxy, None, Some(token)).await?;
    ensure_ok(&resp, "fetch image")?;

    let mime = resp
        .headers()
        .get("content-type")
        .ok()
        .flatten()
        .unwrap_or_else(|| "image/jpeg".to_string());
    let buffer = JsFuture::from(resp.array_buffer().map_err(js_error)?)
        .await
        .map_err(js_error)?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    Ok(FetchedImage { bytes, mime })
}
