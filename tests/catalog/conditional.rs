use bookstore_catalog::etag;
use bookstore_catalog::{
    AuthorPatch, AuthorRequest, CatalogError, Preconditions, PutOutcome, Uuid,
};

use crate::support::{book_request, Fixture};

#[test]
fn create_if_absent_then_conditional_update() {
    let fx = Fixture::new();
    let id = Uuid::new_v4();

    let created = fx
        .authors
        .put(id, &Preconditions::create(), &AuthorRequest::new("Octavia Butler"))
        .unwrap();
    let PutOutcome::Created(created) = created else {
        panic!("expected a create");
    };
    assert_eq!(created.version(), 0);
    assert_eq!(created.etag(), etag::generate(id, 0));

    let updated = fx
        .authors
        .put(
            id,
            &Preconditions::new().with_if_match(created.etag().as_str()),
            &AuthorRequest::new("Octavia E. Butler"),
        )
        .unwrap()
        .into_inner();
    assert_eq!(updated.version(), 1);
    assert_eq!(updated.etag(), etag::generate(id, 1));
    assert_ne!(updated.etag(), created.etag());
}

#[test]
fn put_if_none_match_on_existing_id_conflicts() {
    let fx = Fixture::new();
    let id = Uuid::new_v4();
    fx.books
        .put(id, &Preconditions::create(), &book_request("Kindred", vec![]))
        .unwrap();

    let err = fx
        .books
        .put(id, &Preconditions::create(), &book_request("Overwrite", vec![]))
        .unwrap_err();
    assert!(matches!(err, CatalogError::Conflict(_)));
    assert_eq!(fx.books.require_by_id(id).unwrap().data.title, "Kindred");
}

#[test]
fn update_without_if_match_is_required() {
    let fx = Fixture::new();
    let id = fx.author("Ann Leckie");

    let err = fx
        .authors
        .put(id, &Preconditions::new(), &AuthorRequest::new("A. Leckie"))
        .unwrap_err();
    assert_eq!(
        err,
        CatalogError::PreconditionRequired(
            "If-Match header is required when updating an existing resource.".into()
        )
    );
}

#[test]
fn weak_and_listed_tags_are_accepted() {
    let fx = Fixture::new();
    let id = fx.author("N. K. Jemisin");
    let current = fx.authors.require_by_id(id).unwrap();

    let header = format!("\"stale\", W/{}", current.etag());
    let updated = fx
        .authors
        .patch(
            id,
            &Preconditions::new().with_if_match(header),
            &AuthorPatch {
                name: Some("Nora K. Jemisin".into()),
            },
        )
        .unwrap();
    assert_eq!(updated.version(), 1);
}

#[test]
fn stale_tag_fails_and_leaves_row_untouched() {
    let fx = Fixture::new();
    let id = fx.book("Parable of the Sower", vec![]);
    let v0 = fx.books.require_by_id(id).unwrap();
    fx.books
        .put(id, &Preconditions::matching(&v0), &book_request("Parable of the Talents", vec![]))
        .unwrap();

    let err = fx
        .books
        .put(id, &Preconditions::matching(&v0), &book_request("Lost update", vec![]))
        .unwrap_err();
    assert_eq!(err.status_code(), 412);

    let current = fx.books.require_by_id(id).unwrap();
    assert_eq!(current.version(), 1);
    assert_eq!(current.data.title, "Parable of the Talents");
}

#[test]
fn invertible_tag_with_wrong_version_reports_both_versions() {
    let fx = Fixture::new();
    let id = fx.book("Dawn", vec![]);

    // `*` satisfies the match; the version comes from the invertible candidate
    let header = format!("*, \"{}:5\"", id);
    let err = fx
        .books
        .put(id, &Preconditions::new().with_if_match(header), &book_request("Dusk", vec![]))
        .unwrap_err();
    assert_eq!(err.to_string(), "Entity version mismatch. Expected 5 but was 0");
}

#[test]
fn conditional_delete() {
    let fx = Fixture::new();
    let id = fx.book("Wild Seed", vec![]);
    let current = fx.books.require_by_id(id).unwrap();

    let err = fx
        .books
        .delete_if_match(id, &Preconditions::new().with_if_match("*"))
        .unwrap_err();
    assert!(matches!(err, CatalogError::PreconditionFailed(_)));

    fx.books
        .delete_if_match(id, &Preconditions::matching(&current))
        .unwrap();
    let err = fx.books.require_by_id(id).unwrap_err();
    assert!(matches!(err, CatalogError::NotFound(_)));
}

#[test]
fn conditional_read_reports_not_modified() {
    let fx = Fixture::new();
    let id = fx.author("Becky Chambers");
    let current = fx.authors.require_by_id(id).unwrap();

    let pre = Preconditions::new().with_if_none_match(current.etag().as_str());
    assert!(pre.is_not_modified(&current.etag()));

    let renamed = fx
        .authors
        .update(id, 0, &AuthorRequest::new("B. Chambers"))
        .unwrap();
    assert!(!pre.is_not_modified(&renamed.etag()));
}
