use super::*;
use crate::input::{parse_sites, RowRange};
use crate::names::match_line;
use crate::output::{ReportWriter, CANDIDATES_FILE, SUMMARY_FILE};
use washscout_cascade::SiteReport;
use washscout_core::{CandidateRecord, OriginSite, SiteSummary, SummarySlot};
use washscout_names::ReferenceRegistry;

// -----------------------------------------------------------------------
// Argument parsing
// -----------------------------------------------------------------------

#[test]
fn parses_run_with_defaults() {
    let cli = Cli::try_parse_from(["washscout", "run", "--input", "sites.csv"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::Run {
            ref input,
            start: 0,
            end: None,
            ref output_dir,
        } if input == &PathBuf::from("sites.csv") && output_dir == &PathBuf::from(".")
    ));
}

#[test]
fn parses_run_with_row_range() {
    let cli = Cli::try_parse_from([
        "washscout",
        "run",
        "--input",
        "sites.csv",
        "--start",
        "10",
        "--end",
        "25",
        "--output-dir",
        "out",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Commands::Run {
            start: 10,
            end: Some(25),
            ..
        }
    ));
}

#[test]
fn run_requires_input() {
    assert!(Cli::try_parse_from(["washscout", "run"]).is_err());
}

#[test]
fn parses_normalize_names() {
    let cli = Cli::try_parse_from(["washscout", "normalize", "Mister Car Wash", "Quick Lube"])
        .unwrap();
    assert!(matches!(
        cli.command,
        Commands::Normalize { ref names } if names.len() == 2
    ));
}

#[test]
fn normalize_requires_a_name() {
    assert!(Cli::try_parse_from(["washscout", "normalize"]).is_err());
}

#[test]
fn parses_match_with_reference_csv() {
    let cli = Cli::try_parse_from([
        "washscout",
        "match",
        "Tommy's Express",
        "--reference-csv",
        "refs.csv",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Commands::Match {
            reference_csv: Some(ref p),
            ..
        } if p == &PathBuf::from("refs.csv")
    ));
}

// -----------------------------------------------------------------------
// Input rows
// -----------------------------------------------------------------------

const INPUT: &str = "\
Address,Latitude,Longitude,Extra
100 Main St,34.05,-118.24,x
200 Oak Ave,,-118.30,y
,34.10,-118.20,z
400 Pine Rd,not-a-number,-118.10
";

#[test]
fn reads_sites_by_position() {
    let sites = parse_sites(INPUT.as_bytes(), RowRange::new(0, None).unwrap()).unwrap();

    assert_eq!(sites.len(), 4);
    assert_eq!(
        sites[0],
        OriginSite {
            row: 0,
            address: Some("100 Main St".to_string()),
            latitude: Some(34.05),
            longitude: Some(-118.24),
        }
    );
    assert_eq!(sites[1].latitude, None);
    assert_eq!(sites[2].address, None);
    assert_eq!(sites[3].latitude, None);
    assert_eq!(sites[3].longitude, Some(-118.10));
}

#[test]
fn windows_1252_address_is_decoded_lossily() {
    let input: &[u8] = b"address,lat,lon\n\
1 Main St,34.05,-118.24\n\
12 Caf\xe9 Ave,34.06,-118.25\n\
3 Oak St,34.07,-118.26\n";

    let sites = parse_sites(input, RowRange::new(0, None).unwrap()).unwrap();

    assert_eq!(sites.len(), 3);
    assert_eq!(sites[1].address.as_deref(), Some("12 Caf\u{FFFD} Ave"));
    assert_eq!(sites[1].latitude, Some(34.06));
    assert_eq!(sites[2].address.as_deref(), Some("3 Oak St"));
}

#[test]
fn row_range_is_half_open() {
    let sites = parse_sites(INPUT.as_bytes(), RowRange::new(1, Some(3)).unwrap()).unwrap();
    let rows: Vec<_> = sites.iter().map(|s| s.row).collect();
    assert_eq!(rows, vec![1, 2]);
}

#[test]
fn empty_range_reads_nothing() {
    let sites = parse_sites(INPUT.as_bytes(), RowRange::new(2, Some(2)).unwrap()).unwrap();
    assert!(sites.is_empty());
}

#[test]
fn end_before_start_is_rejected() {
    assert!(RowRange::new(5, Some(2)).is_err());
}

// -----------------------------------------------------------------------
// Registry lookups
// -----------------------------------------------------------------------

#[test]
fn match_line_reports_canonical_name() {
    let registry = ReferenceRegistry::from_names(["Mister Car Wash"]);
    assert_eq!(
        match_line(&registry, "MISTER CARWASH"),
        "MISTER CARWASH\tmatch\tMister Car Wash"
    );
    assert_eq!(match_line(&registry, "Quick Lube"), "Quick Lube\tno match");
}

// -----------------------------------------------------------------------
// Output files
// -----------------------------------------------------------------------

fn record(found: &str) -> CandidateRecord {
    CandidateRecord {
        origin_address: "100 Main St".to_string(),
        origin_latitude: Some(34.05),
        origin_longitude: Some(-118.24),
        found_name: found.to_string(),
        distance_miles: Some(0.25),
        rating: Some(4.5),
        rating_count: Some(120),
        found_in_competitor_list: true,
        keyword_classification: None,
        keyword_explanation: None,
        place_image_count: None,
        satellite_image: None,
        image_classification: None,
        image_justification: None,
        is_competitor: true,
    }
}

fn report(found: &str) -> SiteReport {
    let slots = vec![
        Some(SummarySlot {
            distance_miles: Some(0.25),
            rating: Some(4.5),
            rating_count: Some(120),
        }),
        None,
    ];
    SiteReport {
        site: OriginSite {
            row: 0,
            address: Some("100 Main St".to_string()),
            latitude: Some(34.05),
            longitude: Some(-118.24),
        },
        candidates: vec![record(found)],
        summary: SiteSummary {
            address: "100 Main St".to_string(),
            competitor_count: Some(1),
            slots,
            note: None,
        },
    }
}

#[test]
fn headers_are_written_once_across_runs() {
    let dir = tempfile::tempdir().unwrap();

    {
        let mut writer = ReportWriter::open(dir.path(), 2).unwrap();
        writer.write(&report("Mister Car Wash")).unwrap();
    }
    {
        let mut writer = ReportWriter::open(dir.path(), 2).unwrap();
        writer.write(&report("Tommy's Express")).unwrap();
    }

    let candidates = std::fs::read_to_string(dir.path().join(CANDIDATES_FILE)).unwrap();
    let lines: Vec<_> = candidates.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("Original_Name_Address,Original_Latitude"));
    assert!(lines[0].ends_with("is_competitor"));
    assert!(lines[1].contains("Mister Car Wash"));
    assert!(lines[2].contains("Tommy's Express"));
    assert_eq!(lines.iter().filter(|l| l.contains("Found_Car_Wash_Name")).count(), 1);

    let summary = std::fs::read_to_string(dir.path().join(SUMMARY_FILE)).unwrap();
    let lines: Vec<_> = summary.lines().collect();
    assert_eq!(
        lines[0],
        "original_address,competitors_count,distance_1,rating_1,userRatingCount_1,distance_2,rating_2,userRatingCount_2,note"
    );
    assert_eq!(lines[1], "100 Main St,1,0.25,4.5,120,,,,");
    assert_eq!(lines.len(), 3);
}

#[test]
fn placeholder_site_writes_summary_only() {
    let dir = tempfile::tempdir().unwrap();
    let mut writer = ReportWriter::open(dir.path(), 2).unwrap();

    let site = OriginSite {
        row: 4,
        address: Some("9 Elm St".to_string()),
        latitude: None,
        longitude: None,
    };
    writer
        .write(&SiteReport {
            site,
            candidates: Vec::new(),
            summary: SiteSummary::placeholder("9 Elm St", 2, "missing or invalid site coordinates"),
        })
        .unwrap();
    drop(writer);

    let candidates = std::fs::read_to_string(dir.path().join(CANDIDATES_FILE)).unwrap();
    assert!(candidates.is_empty());
    let summary = std::fs::read_to_string(dir.path().join(SUMMARY_FILE)).unwrap();
    assert_eq!(
        summary.lines().nth(1),
        Some("9 Elm St,,,,,,,,missing or invalid site coordinates")
    );
}
