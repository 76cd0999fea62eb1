//! 詳細画面のセクション定義
//!
//! 表示順・既定タイトル・既定ラベル・属性キーの対応表。
//! ギャラリーは関連する情報セクションの直後に並ぶ。

/// 情報欄の1フィールド
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDefinition {
    /// 属性キー（"id" はエンティティID）
    pub key: &'static str,
    /// 既定ラベル
    pub label: &'static str,
}

const fn field(key: &'static str, label: &'static str) -> FieldDefinition {
    FieldDefinition { key, label }
}

/// ラベル付き情報セクション
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InfoSectionDef {
    pub title: &'static str,
    pub fields: &'static [FieldDefinition],
}

/// 画像ギャラリー
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GalleryDef {
    pub title: &'static str,
    /// メディアコレクションの属性キー
    pub key: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionDef {
    Info(InfoSectionDef),
    Gallery(GalleryDef),
}

const fn info(title: &'static str, fields: &'static [FieldDefinition]) -> SectionDef {
    SectionDef::Info(InfoSectionDef { title, fields })
}

const fn gallery(title: &'static str, key: &'static str) -> SectionDef {
    SectionDef::Gallery(GalleryDef { title, key })
}

/// 詳細画面のレイアウト（表示順）
pub const DETAIL_LAYOUT: &[SectionDef] = &[
    info("Basic Information", &[
        field("id", "Visit ID"),
        field("user", "User"),
        field("visitdate", "Visit Date"),
        field("createdAt", "Created Date"),
    ]),
    info("Site Description", &[
        field("gpsLocation", "GPS Location"),
        field("governorate", "Governorate"),
        field("district", "District"),
        field("city", "City"),
        field("street", "Street"),
        field("plotNumber", "Plot Number"),
        field("historicalorarchaeologicalsite", "Historical or Archaeological site"),
        field("buildingName", "Building Name"),
        field("buildDate", "Build Date"),
        field("architecturalStyle", "Architectural Style"),
        field("locationtype", "Location type"),
        field("protectionlevel", "Protection level"),
        field("siteOwnership", "Site ownership"),
        field("ownerName", "Owner's name"),
        field("responsiblePerson", "Responsible person"),
        field("buildingHeight", "Building height"),
        field("numberOfFloors", "Number of floors"),
        field("category", "Category"),
        field("generalConditionOfSite", "General Condition of the site"),
        field("stateBeforeTheEvent", "The state of the site before the event"),
        field("intangibleHeritageActivities", "Intangible Heritage activities"),
        field("memberofaninternalOrganization", "Member of an internal organization"),
    ]),
    gallery("Current Photos of Site", "currentPhotoOfSite"),
    gallery("Site Photos Before Event", "sitephotosBeforeEvent"),
    info("Socio-Economical & Heritage Situation", &[
        field("typeUseTheSite", "Type of use of the site/building"),
        field("staySameJob", "Did his job stay the same"),
        field("whatnewJob", "What is the new job"),
        field("usageType", "Type of use after a disaster"),
        field("financialSituationBeforeBlast", "Financial situation before blast"),
        field("financialSituationAfterBlast", "Financial situation after blast"),
        field("typeOfAssistance", "Type of assistance for restoration"),
        field("urgentNeed", "Urgent need for funds"),
    ]),
    info("Safety Check Up", &[
        field("safeToEnter", "Is it safe to enter"),
        field("electricity", "Is there electricity"),
        field("gas", "Is there Gas"),
        field("floodWater", "Is there a water leak"),
        field("levelOfDamageToFloor", "Level of damage to the floor"),
        field("levelDamageCeiling", "Level of damage to the ceiling"),
        field("levelDamageArchaeological", "Level of damage to the archaeological remains"),
        field("structuralproblem", "Structural problem"),
    ]),
    gallery("Floor Photos", "inFloorPhotos"),
    info("External Security Assessment - External Walls", &[
        field("exmaterialsConstructionSystem", "Material"),
        field("expaper", "Cladding material"),
        field("exLevelDamage", "Level of damage"),
        field("exTypeOfDamage", "Type of damage"),
        field("exConservPriority", "Conservation priority"),
    ]),
    gallery("External Wall Photos", "exPhotos"),
    info("External Security Assessment - Sculpture in the facade", &[
        field("roofLevelDamage", "Level of damage"),
        field("roofTypeDamage", "Type of damage"),
        field("roofConservationPriority", "Conservation priority"),
    ]),
    gallery("Roof Photos", "roofPhotos"),
    info("External Security Assessment - Outside Floor", &[
        field("outsideMaterial", "Material"),
        field("outsideLevelDamage", "Level of damage"),
        field("outsideTypeDamage", "Type of damage"),
        field("outsideConservationPriority", "Conservation priority"),
    ]),
    gallery("Outside Photos", "outsidePhotos"),
    info("External Security Assessment - Main entrance doors", &[
        field("entranceNumber", "Number"),
        field("entranceLevelDamage", "Level of damage"),
        field("entranceTypeDamage", "Type of damage"),
        field("entranceConservationPriority", "Conservation priority"),
    ]),
    gallery("Entrance Photos", "entrancePhotos"),
    info("External Security Assessment - External windows", &[
        field("externalNumber", "Number of windows"),
        field("externalWindowsMaterial", "Material"),
        field("externalSecurityWindow", "Security window"),
        field("externalNumberWindows", "Number of windows affected"),
        field("externalLevelDamage", "Level of damage"),
        field("externalTypeDamage", "Type of damage"),
        field("externalConservationPriority", "Conservation priority"),
    ]),
    gallery("External Photos", "externalPhotos"),
    info("External Security Assessment - Structural Elements", &[
        field("stracturalSystem", "Structural system"),
        field("structuralLevelDamage", "Level of damage"),
        field("structuralTypeDamage", "Type of damage"),
        field("structuralConservationPriority", "Conservation priority"),
    ]),
    gallery("Structural Photos", "structuralPhotos"),
    info("Internal Security Assessment - Internal walls", &[
        field("internalWallsMaterial", "Material"),
        field("inWallsLevelDamage", "Level of damage"),
        field("inWallsTypeDamage", "Type of damage"),
        field("inWallsConservationPriority", "Conservation priority"),
    ]),
    gallery("Internal Wall Photos", "inWallsPhotos"),
    info("Internal Security Assessment - Featured items on the walls", &[
        field("featureditemsLevelDamage", "Level of damage"),
        field("featureditemsTypeDamage", "Type of damage"),
        field("featureditemsConservationPrio", "Conservation priority"),
    ]),
    gallery("Featured Items Photos", "infeatureditemsphotos"),
    info("Internal Security Assessment - Ceiling", &[
        field("internalroofstyle", "Roof style"),
        field("inCeillingMaterial", "Material"),
        field("inCeillingLevelDamage", "Level of damage"),
        field("inCeillingTypeDamage", "Type of damage"),
        field("inCeillingConservationPrio", "Conservation priority"),
    ]),
    gallery("Ceiling Photos", "inCeillingPhotos2"),
    info("Internal Security Assessment - Archaeological remains", &[
        field("archaeologicalremainsType", "Type"),
        field("archaeologicalremainsmaterial", "Material"),
        field("archaeologicalremainsLevelDamage", "Level of damage"),
        field("archaeologicalremainsTypedamage", "Type of damage"),
        field("archaeologicalremainsConservationPrio", "Conservation priority"),
    ]),
    gallery("Archaeological Remains Photos", "archaeologicalremainsphotos"),
    gallery("General Building Photos", "generalPhotosBuilding"),
    info("Final Notes", &[
        field("inCollectionNotes2", "General notes on security work needed"),
        field("generalNotesAboutBuilding", "General notes about the building"),
        field("relationshipWithSite", "The local community's relationship with the site"),
        field("OwnNotes", "Own notes"),
    ]),
];

/// 情報セクションのみ
pub fn info_sections() -> impl Iterator<Item = &'static InfoSectionDef> {
    DETAIL_LAYOUT.iter().filter_map(|s| match s {
        SectionDef::Info(info) => Some(info),
        SectionDef::Gallery(_) => None,
    })
}

/// ギャラリーのみ
pub fn galleries() -> impl Iterator<Item = &'static GalleryDef> {
    DETAIL_LAYOUT.iter().filter_map(|s| match s {
        SectionDef::Gallery(g) => Some(g),
        SectionDef::Info(_) => None,
    })
}

/// 既定ラベルの一覧（重複除去、出現順）
pub fn default_labels() -> Vec<&'static str> {
    let mut labels: Vec<&'static str> = Vec::new();
    for section in info_sections() {
        for f in section.fields {
            if !labels.contains(&f.label) {
                labels.push(f.label);
            }
        }
    }
    labels
}

/// 既定タイトルの一覧（情報セクション + ギャラリー、表示順）
pub fn default_titles() -> Vec<&'static str> {
    DETAIL_LAYOUT
        .iter()
        .map(|s| match s {
            SectionDef::Info(info) => info.title,
            SectionDef::Gallery(g) => g.title,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_counts() {
        assert_eq!(info_sections().count(), 15);
        assert_eq!(galleries().count(), 14);
    }

    #[test]
    fn test_field_count() {
        let total: usize = info_sections().map(|s| s.fields.len()).sum();
        assert_eq!(total, 90);
    }

    #[test]
    fn test_titles_are_unique() {
        let titles = default_titles();
        let mut sorted = titles.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), titles.len());
    }

    #[test]
    fn test_order_starts_with_basic_information() {
        assert_eq!(default_titles()[0], "Basic Information");
        assert_eq!(*default_titles().last().unwrap(), "Final Notes");
    }

    #[test]
    fn test_default_labels_deduplicated() {
        let labels = default_labels();
        assert_eq!(labels.iter().filter(|l| **l == "Level of damage").count(), 1);
        assert!(labels.contains(&"City"));
    }
}
