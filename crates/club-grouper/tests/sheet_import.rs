use club_grouper::config::KeywordTables;
use club_grouper::export::{write_duplicate_report, write_grouped_report};
use club_grouper::grouping::TeamGrouper;
use club_grouper::import::{ImportError, TeamSheetImporter};
use std::fs;

const KEYWORDS: &str = r#"{
    "youth_keywords": ["Juniors"],
    "mens_keywords": ["Vets"],
    "ladies_keywords": ["Ladies"],
    "color_keywords": [],
    "disability_keywords": [],
    "abbreviation_map": {},
    "club_suffixes": ["Town"]
}"#;

#[test]
fn select_sheet_skips_sheets_without_name_column() {
    let dir = tempfile::tempdir().expect("temp dir");
    let fixtures = dir.path().join("Fixtures.csv");
    let teams = dir.path().join("Teams.csv");
    fs::write(&fixtures, "Home,Away,Score\nAshby,Riverside,2-1\n").expect("write fixtures");
    fs::write(&teams, "Name,Age\nAshby Town Juniors,U12\nAshby Town Ladies,\n")
        .expect("write teams");

    let sheet = TeamSheetImporter::select_sheet(&[&fixtures, &teams]).expect("teams sheet found");
    assert_eq!(sheet.source, teams);
    assert_eq!(sheet.names, vec!["Ashby Town Juniors", "Ashby Town Ladies"]);
}

#[test]
fn select_sheet_reports_missing_name_column() {
    let dir = tempfile::tempdir().expect("temp dir");
    let fixtures = dir.path().join("Fixtures.csv");
    fs::write(&fixtures, "Home,Away\nAshby,Riverside\n").expect("write fixtures");

    let error = TeamSheetImporter::select_sheet(&[fixtures]).expect_err("no Name column");
    assert!(matches!(error, ImportError::MissingNameColumn));
}

#[test]
fn sheet_round_trips_into_report_files() {
    let dir = tempfile::tempdir().expect("temp dir");
    let input = dir.path().join("teams.csv");
    fs::write(
        &input,
        "Name\nAshby Town Juniors\nAshby Town Juniors\nAshby Town Vets\n\"3 - 0\"\n",
    )
    .expect("write input");

    let rules = KeywordTables::from_json_str(KEYWORDS)
        .expect("keywords parse")
        .compile()
        .expect("keywords compile");
    let names = TeamSheetImporter::from_path(&input).expect("sheet imports");
    let outcome = TeamGrouper::new(&rules).group(names);

    let grouped_path = dir.path().join("grouped_output.csv");
    let duplicates_path = dir.path().join("grouped_output_duplicates.csv");
    write_grouped_report(fs::File::create(&grouped_path).expect("create"), &outcome)
        .expect("grouped report writes");
    let written = write_duplicate_report(fs::File::create(&duplicates_path).expect("create"), &outcome)
        .expect("duplicate report writes");
    assert!(written);

    let grouped = fs::read_to_string(&grouped_path).expect("read grouped");
    assert!(grouped.starts_with("Club (Category),Team Count,Teams\n"));
    assert!(grouped.contains("ASHBY TOWN (Mens),1,Ashby Town Vets\n"));
    assert!(grouped.contains("ASHBY TOWN (Youth),1,Ashby Town Juniors\n"));
    assert!(grouped.ends_with("CHECK (Grouped + Duplicates),2 + 1 = 3,Original = 3\n"));

    let duplicates = fs::read_to_string(&duplicates_path).expect("read duplicates");
    assert_eq!(
        duplicates,
        "Name,Occurrences,Duplicate_Count\nAshby Town Juniors,2,1\n,,\nTOTAL DUPLICATES,1,\n"
    );
}
