//! Integration tests for the record-file store.

use bugtrail::collection::IssueCollection;
use bugtrail::domain::{Command, IssueType, Resolution, State};
use bugtrail::error::Error;
use bugtrail::storage::{IssueStore, LoadWarning, RecordFileStore};
use rstest::{fixture, rstest};
use tempfile::TempDir;

#[fixture]
fn temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp directory")
}

fn sample_collection() -> IssueCollection {
    let mut issues = IssueCollection::new();
    let bug = issues
        .create(IssueType::Bug, "Crash, then hang", "Reported by QA")
        .unwrap();
    issues.execute(bug, &Command::confirm("Reproduced").unwrap()).unwrap();
    issues
        .execute(bug, &Command::assign("alice", "Steps:\n  open\n  save").unwrap())
        .unwrap();

    let idea = issues.create(IssueType::Enhancement, "Dark mode", "Requested").unwrap();
    issues
        .execute(idea, &Command::resolve(Resolution::WontFix, "Not now").unwrap())
        .unwrap();
    issues
}

#[rstest]
#[tokio::test]
async fn save_then_load_round_trips(temp_dir: TempDir) {
    let store = RecordFileStore::new(temp_dir.path().join("issues.txt"));
    let issues = sample_collection();

    store.save(issues.issues()).await.unwrap();
    let (loaded, warnings) = store.load().await.unwrap();

    assert!(warnings.is_empty());
    assert_eq!(loaded, issues.issues());
    assert_eq!(loaded[0].notes()[2], "[Confirmed] Steps:\n  open\n  save");
}

#[rstest]
#[tokio::test]
async fn file_layout_matches_record_format(temp_dir: TempDir) {
    let path = temp_dir.path().join("issues.txt");
    let store = RecordFileStore::new(&path);
    store.save(sample_collection().issues()).await.unwrap();

    let content = tokio::fs::read_to_string(&path).await.unwrap();
    let expected = "\
*1,Working,Bug,Crash, then hang,alice,true,
-[New] Reported by QA
-[New] Reproduced
-[Confirmed] Steps:
  open
  save
*2,Closed,Enhancement,Dark mode,,false,WONTFIX
-[New] Requested
-[New] Not now
";
    assert_eq!(content, expected);
}

#[rstest]
#[tokio::test]
async fn invalid_records_are_skipped(temp_dir: TempDir) {
    let path = temp_dir.path().join("issues.txt");
    let content = "\
*1,New,Bug,Good one,,false,
-[New] fine
*2,Verifying,Bug,Wrong resolution,ann,true,WONTFIX
-[New] a
*3,Open,Bug,Unknown state,,false,
-[New] b
*not-a-number,New,Bug,Bad id,,false,
-[New] c
*5,Closed,Enhancement,Closed idea,,false,WorksForMe
-[New] d
";
    tokio::fs::write(&path, content).await.unwrap();

    let (loaded, warnings) = RecordFileStore::new(&path).load().await.unwrap();

    let ids: Vec<u32> = loaded.iter().map(|issue| issue.id().get()).collect();
    assert_eq!(ids, [1, 5]);
    assert_eq!(loaded[1].state(), State::Closed);
    assert_eq!(loaded[1].resolution(), Some(Resolution::WorksForMe));

    assert_eq!(warnings.len(), 3);
    assert!(warnings.iter().any(|w| matches!(
        w,
        LoadWarning::MalformedRecord { line_number: 7, .. }
    )));
    assert!(warnings.iter().any(|w| matches!(
        w,
        LoadWarning::InvalidIssueData { issue_id: 2, .. }
    )));
    assert!(warnings.iter().any(|w| matches!(
        w,
        LoadWarning::InvalidIssueData { issue_id: 3, error, .. } if error.contains("Invalid state")
    )));
}

#[rstest]
#[tokio::test]
async fn loaded_ids_advance_the_counter(temp_dir: TempDir) {
    let path = temp_dir.path().join("issues.txt");
    tokio::fs::write(&path, "*8,New,Bug,Old,,false,\n-[New] x\n")
        .await
        .unwrap();

    let (loaded, _) = RecordFileStore::new(&path).load().await.unwrap();
    let mut issues = IssueCollection::new();
    assert!(issues.add_issues(loaded).is_empty());

    let id = issues.create(IssueType::Bug, "New", "y").unwrap();
    assert_eq!(id.get(), 9);
}

#[rstest]
#[tokio::test]
async fn missing_file_is_reported(temp_dir: TempDir) {
    let path = temp_dir.path().join("missing.txt");
    let err = RecordFileStore::new(&path).load().await.unwrap_err();
    assert!(matches!(err, Error::FileNotFound(ref p) if *p == path));
}

#[rstest]
#[tokio::test]
async fn unwritable_owner_fails_save_and_keeps_file(temp_dir: TempDir) {
    let path = temp_dir.path().join("issues.txt");
    let store = RecordFileStore::new(&path);
    store.save(sample_collection().issues()).await.unwrap();
    let before = tokio::fs::read_to_string(&path).await.unwrap();

    let mut issues = sample_collection();
    let id = issues.create(IssueType::Enhancement, "x", "y").unwrap();
    issues
        .execute(id, &Command::assign("smith, j", "z").unwrap())
        .unwrap();

    assert!(matches!(store.save(issues.issues()).await, Err(Error::Storage(_))));
    assert_eq!(tokio::fs::read_to_string(&path).await.unwrap(), before);
}

#[rstest]
#[tokio::test]
async fn undecodable_record_does_not_hide_later_ones(temp_dir: TempDir) {
    let path = temp_dir.path().join("issues.txt");
    let mut content =
        b"stray text\n*1,New,Bug,A,,false,\n-[New] a\n*2,New,Bug,B,,false,\n-[New] b".to_vec();
    content.push(0xff);
    content.extend_from_slice(b"\n*3,New,Bug,C,,false,\n-[New] c\n*4,New,Bug,D,,false,\n-[New] d\n");
    tokio::fs::write(&path, content).await.unwrap();

    let (loaded, warnings) = RecordFileStore::new(&path).load().await.unwrap();

    let ids: Vec<u32> = loaded.iter().map(|issue| issue.id().get()).collect();
    assert_eq!(ids, [1, 3, 4]);
    assert_eq!(warnings.len(), 2);
    assert!(warnings.iter().any(|w| matches!(
        w,
        LoadWarning::MalformedRecord { line_number: 4, error } if error.contains("UTF-8")
    )));
    assert!(warnings.contains(&LoadWarning::StrayLine { line_number: 1 }));
}

#[rstest]
#[case::injected_header("first\n*99,Closed,Bug,Injected,,false,WONTFIX")]
#[case::injected_note_line("first\n-second")]
#[case::blank_line("x\n\ny")]
#[case::carriage_return("x\r")]
#[tokio::test]
async fn notes_that_would_not_read_back_fail_save(temp_dir: TempDir, #[case] note: &str) {
    let path = temp_dir.path().join("issues.txt");
    let store = RecordFileStore::new(&path);
    store.save(sample_collection().issues()).await.unwrap();
    let before = tokio::fs::read_to_string(&path).await.unwrap();

    let mut issues = sample_collection();
    issues.create(IssueType::Bug, "Bad note", note).unwrap();

    assert!(matches!(store.save(issues.issues()).await, Err(Error::Storage(_))));
    assert_eq!(tokio::fs::read_to_string(&path).await.unwrap(), before);
}

#[rstest]
#[tokio::test]
async fn padded_owner_round_trips(temp_dir: TempDir) {
    let store = RecordFileStore::new(temp_dir.path().join("issues.txt"));
    let mut issues = IssueCollection::new();
    let id = issues.create(IssueType::Enhancement, "Idea", "n").unwrap();
    issues
        .execute(id, &Command::assign(" bob ", "mine").unwrap())
        .unwrap();

    store.save(issues.issues()).await.unwrap();
    let (loaded, warnings) = store.load().await.unwrap();

    assert!(warnings.is_empty());
    assert_eq!(loaded, issues.issues());
    assert_eq!(loaded[0].owner(), Some("bob"));
}
