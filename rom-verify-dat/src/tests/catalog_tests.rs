use super::*;
use crate::dat::parse_dat;

const CATALOG_XML: &str = r#"<datafile>
    <header><name>NES</name><version>1</version></header>
    <game name="Game A (USA)"><rom name="a.nes" size="32" crc="aaaa1111"/></game>
    <game name="Game B (Japan)"><rom name="b.nes" size="32" crc="bbbb2222"/></game>
    <game name="Game C (USA, Europe)"><rom name="c.nes" size="32" crc="cccc3333"/></game>
</datafile>"#;

fn sample_index() -> CatalogIndex {
    CatalogIndex::from_dat(&parse_dat(CATALOG_XML.as_bytes()).unwrap())
}

#[test]
fn test_index_size_matches_game_count() {
    let index = sample_index();
    assert_eq!(index.len(), 3);
    assert_eq!(index.get("aaaa1111"), Some("Game A (USA)"));
    assert!(index.contains("bbbb2222"));
    assert!(!index.contains("dddd4444"));
}

#[test]
fn test_remove_is_single_shot() {
    let mut index = sample_index();
    assert_eq!(index.remove("aaaa1111").as_deref(), Some("Game A (USA)"));
    assert_eq!(index.remove("aaaa1111"), None);
    assert_eq!(index.len(), 2);
}

#[test]
fn test_duplicate_checksum_keeps_last_name() {
    let index = CatalogIndex::from_entries([
        CatalogEntry::new("First (USA)", "12345678"),
        CatalogEntry::new("Second (USA)", "12345678"),
    ]);
    assert_eq!(index.len(), 1);
    assert_eq!(index.get("12345678"), Some("Second (USA)"));
}

#[test]
fn test_region_marker_is_case_sensitive_substring() {
    let index = sample_index();
    assert_eq!(index.count_matching("(USA)"), 1);
    assert_eq!(index.count_matching("USA"), 2);
    assert_eq!(index.count_matching("(usa)"), 0);
    assert_eq!(index.count_matching(""), 3);
}

#[test]
fn test_entries_matching_sorted_by_name() {
    let index = CatalogIndex::from_entries([
        CatalogEntry::new("Zelda (USA)", "00000003"),
        CatalogEntry::new("Contra (USA)", "00000001"),
        CatalogEntry::new("Mother (Japan)", "00000002"),
    ]);
    let entries = index.entries_matching("(USA)");
    assert_eq!(
        entries,
        vec![
            CatalogEntry::new("Contra (USA)", "00000001"),
            CatalogEntry::new("Zelda (USA)", "00000003"),
        ]
    );
}

#[test]
fn test_load_catalog_missing_file() {
    let result = load_catalog(Path::new("/nonexistent/rom-verify/nes.dat"));
    assert!(matches!(result, Err(DatError::Io(_))));
}
