use cloudnote_core::{
    derive_title, CloudNoteError, InMemoryNoteRepository, NoteRepository, NoteService,
    SearchQuery, UNTITLED,
};
use std::collections::HashSet;
use std::sync::atomic::{AtomicI64, Ordering};

static TICKS: AtomicI64 = AtomicI64::new(1_000);

fn ticking_clock() -> i64 {
    TICKS.fetch_add(10, Ordering::SeqCst)
}

fn service() -> NoteService<InMemoryNoteRepository> {
    NoteService::new(InMemoryNoteRepository::new())
}

#[test]
fn create_grows_store_by_one_and_puts_note_first() {
    let mut service = service();
    for idx in 0..5 {
        let before = service.len();
        let note = service.create_note(format!("note {idx}"));
        assert_eq!(service.len(), before + 1);
        assert_eq!(service.notes()[0].id, note.id);
        assert_eq!(note.created, note.updated);
    }
}

#[test]
fn create_defaults_to_empty_content() {
    let mut service = service();
    let note = service.create_note("");
    assert_eq!(note.content, "");
    assert_eq!(note.title(), UNTITLED);
}

#[test]
fn ids_are_unique_across_many_notes() {
    let mut service = service();
    let ids: HashSet<String> = (0..500)
        .map(|idx| service.create_note(format!("{idx}")).id)
        .collect();
    assert_eq!(ids.len(), 500);
}

#[test]
fn delete_existing_note_shrinks_store_and_read_reports_not_found() {
    let mut service = service();
    let keep = service.create_note("keep");
    let drop = service.create_note("drop");

    service.delete_note(&drop.id).expect("delete note should succeed");

    assert_eq!(service.len(), 1);
    assert_eq!(
        service.get_note(&drop.id).expect_err("get note should fail"),
        CloudNoteError::NotFound(drop.id.clone())
    );
    assert_eq!(service.get_note(&keep.id).expect("get note should succeed").content, "keep");
}

#[test]
fn delete_missing_note_reports_not_found_and_keeps_size() {
    let mut service = service();
    service.create_note("only");
    let err = service.delete_note("does-not-exist").expect_err("delete note should fail");
    assert_eq!(err, CloudNoteError::NotFound("does-not-exist".to_string()));
    assert_eq!(service.len(), 1);
}

#[test]
fn update_replaces_content_and_moves_updated_forward() {
    let mut service = NoteService::new(InMemoryNoteRepository::with_clock(ticking_clock));
    let note = service.create_note("draft");
    let updated = service.update_note(&note.id, "final").expect("update note should succeed");

    assert_eq!(updated.content, "final");
    assert_eq!(updated.created, note.created);
    assert!(updated.updated > updated.created);
    assert_eq!(service.get_note(&note.id).expect("get note should succeed"), &updated);
}

#[test]
fn update_missing_note_is_not_found() {
    let mut service = service();
    let err = service.update_note("ghost", "text").expect_err("update note should fail");
    assert_eq!(err.kind(), "not_found");
}

#[test]
fn update_does_not_reorder_store() {
    let mut service = service();
    let older = service.create_note("older");
    let newer = service.create_note("newer");
    service.update_note(&older.id, "older, edited").expect("update note should succeed");
    assert_eq!(service.notes()[0].id, newer.id);
    assert_eq!(service.notes()[1].id, older.id);
}

#[test]
fn empty_search_returns_all_notes_in_store_order() {
    let mut service = service();
    let a = service.create_note("a");
    let b = service.create_note("b");
    let c = service.create_note("c");

    let query = SearchQuery::new("");
    let ids: Vec<&str> = service.search(&query).map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec![c.id.as_str(), b.id.as_str(), a.id.as_str()]);
}

#[test]
fn search_is_case_insensitive_and_exclusive() {
    let mut service = service();
    service.create_note("Buy MILK\nand eggs");
    service.create_note("call plumber");
    service.create_note("oat milk latte");

    let query = SearchQuery::new("mIlK");
    let contents: Vec<&str> = service
        .search(&query)
        .map(|n| n.content.as_str())
        .collect();
    assert_eq!(contents, vec!["oat milk latte", "Buy MILK\nand eggs"]);

    let none = SearchQuery::new("dentist");
    assert_eq!(service.search(&none).count(), 0);
}

#[test]
fn search_sees_current_store_state() {
    let mut service = service();
    let note = service.create_note("temporary milk");
    let query = SearchQuery::new("milk");
    assert_eq!(service.search(&query).count(), 1);

    service.delete_note(&note.id).expect("delete note should succeed");
    assert_eq!(service.search(&query).count(), 0);
}

#[test]
fn derive_title_boundaries() {
    assert_eq!(derive_title("", 30), "Untitled");
    assert_eq!(
        derive_title("exactly-thirty-chars-long-AAA", 30),
        "exactly-thirty-chars-long-AAA"
    );
    let truncated = derive_title("this line is definitely longer than thirty chars", 30);
    assert_eq!(truncated, "this line is definitely longer\u{2026}");
}

#[test]
fn repository_trait_reports_len_and_emptiness() {
    let mut repo = InMemoryNoteRepository::new();
    assert!(repo.is_empty());
    repo.create_note("x");
    assert_eq!(repo.len(), 1);
    assert!(!repo.is_empty());
}

#[test]
fn notes_serialize_with_stable_field_names() {
    let mut service = service();
    let note = service.create_note("json me");
    let value = serde_json::to_value(note.summary()).expect("summary should serialize");
    assert_eq!(value["title"], "json me");
    assert_eq!(value["length"], 7);
    assert!(value["id"].is_string());
    assert!(value["updated"].is_i64());
}
