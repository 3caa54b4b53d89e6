use nflschedule::{
    Backend, Dataset, DatasetError, FrameDataset, RecordDataset, ScheduleQuery, ScheduleRecord,
    dataset, load, load_table,
};
use polars::prelude::DataType;
use std::io::Write;
use tempfile::NamedTempFile;

const FIXTURE: &str = "\
game_id, season, week, home_team, away_team, is_main_slate, stadium
g1, 2019, 1, KC, JAX, True, Arrowhead
g2, 2019, 1, CHI, GB, False, Soldier Field
g3, 2019, 2, NE, MIA, 1, Gillette
g4, 2020, 1, DET, CHI, true, Ford Field
g5, 2020, 2, GB, DET, 0, Lambeau
g6, 2020, 1, KC, HOU, FALSE, Arrowhead
";

const BACKENDS: [Backend; 2] = [Backend::Frame, Backend::Records];

fn write_fixture(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn game_ids(dataset: &dyn Dataset) -> Vec<String> {
    dataset.column("game_id").unwrap()
}

#[test]
fn load_keeps_file_order_and_strips_whitespace() {
    let file = write_fixture(FIXTURE);
    let records = load(file.path()).unwrap();

    assert_eq!(records.len(), 6);
    let first = &records[0];
    assert_eq!(first.season, 2019);
    assert_eq!(first.week, 1);
    assert_eq!(first.home_team, "KC");
    assert_eq!(first.away_team, "JAX");
    assert!(first.is_main_slate);
    assert_eq!(first.extra("game_id"), Some("g1"));
    assert_eq!(first.extra("stadium"), Some("Arrowhead"));
    assert_eq!(records[1].extra("stadium"), Some("Soldier Field"));

    let flags: Vec<bool> = records.iter().map(|r| r.is_main_slate).collect();
    assert_eq!(flags, vec![true, false, true, true, false, false]);
}

#[test]
fn load_table_reports_extra_columns_in_header_order() {
    let file = write_fixture(FIXTURE);
    let table = load_table(file.path()).unwrap();
    let extras: Vec<&str> = table.extra_columns().collect();
    assert_eq!(extras, vec!["game_id", "stadium"]);
}

#[test]
fn load_missing_file_is_not_found() {
    let err = load("/definitely/not/here/schedule.csv").unwrap_err();
    assert!(matches!(err, DatasetError::NotFound { .. }));
}

#[test]
fn load_requires_core_columns() {
    let file = write_fixture("season,week,home_team,away_team\n2020,1,DET,CHI\n");
    let err = load(file.path()).unwrap_err();
    match err {
        DatasetError::MissingColumn(column) => assert_eq!(column, "is_main_slate"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn load_rejects_unparseable_week() {
    let file = write_fixture(
        "season,week,home_team,away_team,is_main_slate\n2020,1,DET,CHI,True\n2020,x,GB,MIN,False\n",
    );
    let err = load(file.path()).unwrap_err();
    match err {
        DatasetError::InvalidValue { row, column, value } => {
            assert_eq!(row, 2);
            assert_eq!(column, "week");
            assert_eq!(value, "x");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn filters_match_across_backends() {
    let file = write_fixture(FIXTURE);
    for backend in BACKENDS {
        let data = dataset::open(file.path(), backend).unwrap();
        assert_eq!(data.backend(), backend);
        assert_eq!(data.len(), 6);

        let all = data.filter(&ScheduleQuery::all()).unwrap();
        assert_eq!(game_ids(all.as_ref()), vec!["g1", "g2", "g3", "g4", "g5", "g6"]);

        let season = data.filter(&ScheduleQuery::season(2020)).unwrap();
        assert_eq!(game_ids(season.as_ref()), vec!["g4", "g5", "g6"]);

        let week = data.filter(&ScheduleQuery::week(1)).unwrap();
        assert_eq!(game_ids(week.as_ref()), vec!["g1", "g2", "g4", "g6"]);

        let both = data.filter(&ScheduleQuery::season_week(2020, 1)).unwrap();
        assert_eq!(game_ids(both.as_ref()), vec!["g4", "g6"]);

        let none = data.filter(&ScheduleQuery::season(2018)).unwrap();
        assert!(none.is_empty(), "{backend} should return an empty view");
        assert!(none.records().unwrap().is_empty());
    }
}

#[test]
fn narrowing_again_by_season_is_idempotent() {
    let file = write_fixture(FIXTURE);
    for backend in BACKENDS {
        let data = dataset::open(file.path(), backend).unwrap();
        let narrowed = data.filter(&ScheduleQuery::season_week(2019, 1)).unwrap();
        let again = narrowed.filter(&ScheduleQuery::season(2019)).unwrap();
        assert_eq!(narrowed.records().unwrap(), again.records().unwrap());
    }
}

#[test]
fn backends_produce_identical_records() {
    let file = write_fixture(FIXTURE);
    let frame = dataset::open(file.path(), Backend::Frame).unwrap();
    let records = dataset::open(file.path(), Backend::Records).unwrap();
    assert_eq!(frame.records().unwrap(), records.records().unwrap());
    assert_eq!(frame.column("season").unwrap(), records.column("season").unwrap());
    assert_eq!(
        frame.column("is_main_slate").unwrap(),
        records.column("is_main_slate").unwrap()
    );
}

#[test]
fn main_slate_helpers_across_backends() {
    let file = write_fixture(FIXTURE);
    for backend in BACKENDS {
        let data = dataset::open(file.path(), backend).unwrap();
        assert_eq!(data.main_slate_count().unwrap(), 3);

        let week = data.filter(&ScheduleQuery::season_week(2020, 1)).unwrap();
        assert_eq!(week.main_slate_count().unwrap(), 1);
        assert_eq!(week.main_slate_teams().unwrap(), vec!["DET", "CHI"]);

        let teams = data.main_slate_teams().unwrap();
        assert_eq!(teams, vec!["KC", "JAX", "NE", "MIA", "DET", "CHI"]);
    }
}

#[test]
fn distinct_seasons_and_weeks_in_first_appearance_order() {
    let file = write_fixture(FIXTURE);
    for backend in BACKENDS {
        let data = dataset::open(file.path(), backend).unwrap();
        assert_eq!(data.seasons().unwrap(), vec![2019, 2020]);
        assert_eq!(data.weeks().unwrap(), vec![1, 2]);
    }
}

#[test]
fn unknown_column_is_reported() {
    let file = write_fixture(FIXTURE);
    for backend in BACKENDS {
        let data = dataset::open(file.path(), backend).unwrap();
        let err = data.column("kickoff_temp").unwrap_err();
        assert!(matches!(err, DatasetError::MissingColumn(_)));
    }
}

#[test]
fn frame_dataset_adopts_foreign_frames() {
    let df = polars::df!(
        "season" => [2020i64, 2020, 2021],
        "week" => [1i64, 2, 1],
        "home_team" => ["DET", "GB", "LAR"],
        "away_team" => ["CHI", "DET", "CHI"],
        "is_main_slate" => [true, false, false],
    )
    .unwrap();
    let data = FrameDataset::from_dataframe(df).unwrap();
    assert_eq!(data.dataframe().column("season").unwrap().dtype(), &DataType::Int32);

    let week = data.filter(&ScheduleQuery::season_week(2020, 1)).unwrap();
    assert_eq!(
        week.records().unwrap(),
        vec![ScheduleRecord::new(2020, 1, "DET", "CHI", true)]
    );

    let missing = polars::df!("season" => [2020i32]).unwrap();
    assert!(matches!(
        FrameDataset::from_dataframe(missing),
        Err(DatasetError::MissingColumn(_))
    ));
}

#[test]
fn record_dataset_from_records() {
    let data = RecordDataset::from_records(vec![
        ScheduleRecord::new(2020, 1, "DET", "CHI", true).with_extra("game_id", "a"),
        ScheduleRecord::new(2020, 2, "GB", "DET", false).with_extra("game_id", "b"),
    ]);
    assert_eq!(data.columns().len(), 6);
    assert_eq!(data.column("game_id").unwrap(), vec!["a", "b"]);
    assert_eq!(data.filter(&ScheduleQuery::week(2)).unwrap().len(), 1);
    assert_eq!(data.main_slate_count().unwrap(), 1);
}

#[test]
fn backend_parses_from_text() {
    assert_eq!("frame".parse::<Backend>().unwrap(), Backend::Frame);
    assert_eq!(" Records ".parse::<Backend>().unwrap(), Backend::Records);
    assert!("pandas".parse::<Backend>().is_err());
    assert_eq!(Backend::Records.to_string(), "records");
}

#[test]
fn extra_columns_keep_header_order_across_backends() {
    let file = write_fixture(
        "zone,season,week,home_team,away_team,is_main_slate,alpha\n\
         west,2020,1,LAR,DAL,False,x\n",
    );
    for backend in BACKENDS {
        let data = dataset::open(file.path(), backend).unwrap();
        let records = data.records().unwrap();
        let extras: Vec<&str> = records[0].extra_columns().collect();
        assert_eq!(extras, vec!["zone", "alpha"], "{backend}");
        assert_eq!(records[0].extra("zone"), Some("west"));
    }

    let data = RecordDataset::from_records(vec![
        ScheduleRecord::new(2020, 1, "LAR", "DAL", false)
            .with_extra("zone", "west")
            .with_extra("alpha", "x"),
    ]);
    assert_eq!(&data.columns()[5..], &["zone".to_string(), "alpha".to_string()]);
}

#[test]
fn set_extra_replaces_in_place() {
    let mut record = ScheduleRecord::new(2020, 1, "DET", "CHI", true)
        .with_extra("b", "1")
        .with_extra("a", "2");
    record.set_extra("b", "3");
    assert_eq!(
        record.extra,
        vec![("b".to_string(), "3".to_string()), ("a".to_string(), "2".to_string())]
    );
    assert_eq!(record.get("b"), Some("3".to_string()));
}

#[test]
fn frame_records_reject_nulls_in_any_required_column() {
    let null_team = polars::df!(
        "season" => [2020i32, 2020],
        "week" => [1i32, 1],
        "home_team" => [Some("DET"), None],
        "away_team" => ["CHI", "GB"],
        "is_main_slate" => [true, false],
    )
    .unwrap();
    match FrameDataset::from_dataframe(null_team).unwrap().records() {
        Err(DatasetError::InvalidValue { row, column, .. }) => {
            assert_eq!(row, 2);
            assert_eq!(column, "home_team");
        }
        other => panic!("unexpected result: {other:?}"),
    }

    let null_flag = polars::df!(
        "season" => [2020i32],
        "week" => [1i32],
        "home_team" => ["DET"],
        "away_team" => ["CHI"],
        "is_main_slate" => [None::<bool>],
    )
    .unwrap();
    match FrameDataset::from_dataframe(null_flag).unwrap().records() {
        Err(DatasetError::InvalidValue { column, .. }) => assert_eq!(column, "is_main_slate"),
        other => panic!("unexpected result: {other:?}"),
    }
}
