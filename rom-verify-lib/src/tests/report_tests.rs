use super::*;
use std::collections::BTreeMap;

use rom_verify_dat::CatalogIndex;

use crate::engine::RunStats;

/// `matched` holds `(game, checksum)` pairs, like `unmatched`.
fn reconciliation(unmatched: &[(&str, &str)], matched: &[(&str, &str)]) -> Reconciliation {
    Reconciliation {
        unmatched: CatalogIndex::from_entries(
            unmatched
                .iter()
                .map(|(name, crc)| CatalogEntry::new(*name, *crc)),
        ),
        matched: matched
            .iter()
            .map(|(name, crc)| (crc.to_string(), name.to_string()))
            .collect::<BTreeMap<_, _>>(),
        stats: RunStats::default(),
    }
}

#[test]
fn test_completion_rate_rounding() {
    assert_eq!(completion_rate(1, 1), 100.0);
    assert_eq!(completion_rate(0, 5), 0.0);
    assert_eq!(completion_rate(1, 3), 33.33);
    assert_eq!(completion_rate(2, 3), 66.67);
    assert_eq!(completion_rate(1, 8), 12.5);
}

#[test]
fn test_completion_rate_ties_round_to_even() {
    // 1/32 and 3/32 give exactly 3.125 and 9.375
    assert_eq!(completion_rate(1, 32), 3.12);
    assert_eq!(completion_rate(3, 32), 9.38);
}

#[test]
fn test_completion_rate_empty_region() {
    assert_eq!(completion_rate(3, 0), 0.0);
}

#[test]
fn test_format_rate() {
    assert_eq!(format_rate(100.0), "100.0");
    assert_eq!(format_rate(0.0), "0.0");
    assert_eq!(format_rate(12.5), "12.5");
    assert_eq!(format_rate(33.33), "33.33");
    assert_eq!(format_rate(150.0), "150.0");
}

#[test]
fn test_report_filters_missing_by_region() {
    let rec = reconciliation(
        &[
            ("Zelda (USA)", "00000003"),
            ("Mother (Japan)", "00000002"),
            ("Contra (USA)", "00000001"),
        ],
        &[("Metroid (Europe)", "0000000a")],
    );
    let report = Report::generate(4, &rec, "(USA)");
    assert_eq!(report.dat_size, 4);
    assert_eq!(report.romset_size, 1);
    assert_eq!(report.completion_rate, 25.0);
    assert_eq!(
        report.missing,
        vec![
            CatalogEntry::new("Contra (USA)", "00000001"),
            CatalogEntry::new("Zelda (USA)", "00000003"),
        ]
    );
}

#[test]
fn test_missing_file_format() {
    let rec = reconciliation(&[("Game A (USA)", "aaaa1111"), ("Game C (USA)", "cccc3333")], &[]);
    let report = Report::generate(2, &rec, "(USA)");
    let mut out = Vec::new();
    report.write_missing_to(&mut out).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "Game A (USA), aaaa1111\nGame C (USA), cccc3333\n"
    );
}

#[test]
fn test_write_missing_overwrites() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("MISSING");
    std::fs::write(&path, "stale line\nanother stale line\n").unwrap();

    let rec = reconciliation(&[], &[("Game A (USA)", "aaaa1111")]);
    let report = Report::generate(1, &rec, "(USA)");
    report.write_missing(&path).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
}

#[test]
fn test_write_missing_to_bad_path() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("no-such-dir").join("MISSING");
    let report = Report::generate(0, &reconciliation(&[], &[]), "(USA)");
    assert!(matches!(
        report.write_missing(&path),
        Err(ReportError::Write { .. })
    ));
}

#[test]
fn test_summary_lines() {
    let rec = reconciliation(&[], &[("A (USA)", "a"), ("B (USA)", "b")]);
    let report = Report::generate(3, &rec, "(USA)");
    assert_eq!(
        report.summary_lines(),
        [
            "found 2 valid roms out of 3".to_string(),
            "romset is 66.67% complete".to_string(),
        ]
    );
}

#[test]
fn test_region_matched_counts_only_the_region() {
    let rec = reconciliation(
        &[("Mother (Japan)", "00000002")],
        &[
            ("Contra (USA)", "00000001"),
            ("Zelda (USA)", "00000003"),
            ("Metroid (Japan)", "00000004"),
        ],
    );
    let usa = Report::generate(4, &rec, "(USA)");
    assert_eq!(usa.romset_size, 3);
    assert_eq!(usa.region_matched, 2);
    assert_eq!(usa.region_rate(), 50.0);
    assert_eq!(usa.breakdown_line(), "(USA)         50.0%         2/4");

    let japan = Report::generate(2, &rec, "(Japan)");
    assert_eq!(japan.region_matched, 1);
    assert_eq!(japan.breakdown_line(), "(Japan)       50.0%         1/2");
}

#[test]
fn test_combined_missing_merges_regions() {
    let rec = reconciliation(
        &[
            ("Zelda (USA)", "00000003"),
            ("Mother (Japan)", "00000002"),
            ("Contra (USA, Japan)", "00000001"),
            ("Elite (Europe)", "00000005"),
        ],
        &[],
    );
    let reports = [
        Report::generate(2, &rec, "USA"),
        Report::generate(2, &rec, "Japan"),
    ];
    assert_eq!(
        combined_missing(&reports),
        vec![
            CatalogEntry::new("Contra (USA, Japan)", "00000001"),
            CatalogEntry::new("Mother (Japan)", "00000002"),
            CatalogEntry::new("Zelda (USA)", "00000003"),
        ]
    );

    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("MISSING");
    write_entries(&path, &combined_missing(&reports)).unwrap();
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "Contra (USA, Japan), 00000001\nMother (Japan), 00000002\nZelda (USA), 00000003\n"
    );
}
