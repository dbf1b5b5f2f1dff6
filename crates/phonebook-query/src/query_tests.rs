use super::*;
use phonebook_core::ErrorCode;
use phonebook_model::{NewPhoneRecord, PhoneValidator};

const UGANDA_VALID: &str = "(256) 775069443";
const MOROCCO_INVALID: &str = "(212) 123";

/// 101 rows, ids 1..=101. Odd ids are valid Ugandan numbers, even ids are
/// invalid Moroccan ones.
fn setup_db() -> SqliteStore {
    let store = SqliteStore::open_in_memory().expect("open memory db");
    store.migrate().expect("schema");
    store.seed_countries().expect("countries");
    for i in 1..=101u64 {
        let input = if i % 2 == 1 {
            NewPhoneRecord::parse("Uganda", UGANDA_VALID, None)
        } else {
            NewPhoneRecord::parse("Morocco", MOROCCO_INVALID, Some("cust-7"))
        }
        .expect("parse");
        let rec = store
            .create(&input.into_validated(PhoneValidator::standard()))
            .expect("insert");
        assert_eq!(rec.id, i);
    }
    store
}

fn ids(resp: &ListPageResponse) -> Vec<u64> {
    resp.records.iter().map(|r| r.id).collect()
}

fn page(store: &SqliteStore, size: Option<i64>, token: &str) -> ListPageResponse {
    list_page(
        store,
        &ListPageRequest {
            page_size: size,
            page_token: token.to_string(),
            filter: PhoneFilter::default(),
        },
        &PageLimits::default(),
    )
    .expect("list page")
}

#[test]
fn walks_all_pages_in_descending_id_order() {
    let store = setup_db();

    let first = page(&store, Some(50), "");
    assert_eq!(ids(&first), (52..=101).rev().collect::<Vec<_>>());
    assert_eq!(first.next_page_token.as_deref(), Some("NTI="));
    assert_eq!(first.collection_count, Some(101));

    let second = page(&store, Some(50), "NTI=");
    assert_eq!(ids(&second), (2..=51).rev().collect::<Vec<_>>());
    assert_eq!(second.next_page_token.as_deref(), Some("Mg=="));
    assert_eq!(second.collection_count, None);

    let third = page(&store, Some(50), "Mg==");
    assert_eq!(ids(&third), vec![1]);
    assert_eq!(third.next_page_token, None);
    assert_eq!(third.collection_count, None);
}

#[test]
fn oversized_and_non_positive_sizes_clamp_to_fifty() {
    let store = setup_db();
    assert_eq!(page(&store, Some(500), "").records.len(), 50);
    assert_eq!(page(&store, Some(0), "").records.len(), 50);
    assert_eq!(page(&store, Some(-1), "").records.len(), 50);
    assert_eq!(page(&store, None, "").records.len(), 50);
    assert_eq!(page(&store, Some(7), "").records.len(), 7);
}

#[test]
fn exact_fit_page_has_no_next_token() {
    let store = SqliteStore::open_in_memory().expect("open");
    store.migrate().expect("schema");
    for _ in 0..3 {
        let input = NewPhoneRecord::parse("Uganda", UGANDA_VALID, None).expect("parse");
        store
            .create(&input.into_validated(PhoneValidator::standard()))
            .expect("insert");
    }
    let resp = page(&store, Some(3), "");
    assert_eq!(resp.records.len(), 3);
    assert_eq!(resp.next_page_token, None);
    assert_eq!(resp.collection_count, Some(3));
}

#[test]
fn empty_table_yields_empty_first_page() {
    let store = SqliteStore::open_in_memory().expect("open");
    store.migrate().expect("schema");
    let resp = page(&store, None, "");
    assert!(resp.records.is_empty());
    assert_eq!(resp.next_page_token, None);
    assert_eq!(resp.collection_count, Some(0));
}

#[test]
fn filters_restrict_rows_and_count() {
    let store = setup_db();
    let run = |filter: PhoneFilter| {
        list_page(
            &store,
            &ListPageRequest {
                page_size: Some(50),
                page_token: String::new(),
                filter,
            },
            &PageLimits::default(),
        )
        .expect("list")
    };

    let valid = run(PhoneFilter {
        validity: ValidityFilter::ValidOnly,
        ..PhoneFilter::default()
    });
    assert_eq!(valid.collection_count, Some(51));
    assert!(valid.records.iter().all(|r| r.phone_valid));
    assert_eq!(valid.records.first().map(|r| r.id), Some(101));

    let invalid = run(PhoneFilter {
        validity: ValidityFilter::InvalidOnly,
        ..PhoneFilter::default()
    });
    assert_eq!(invalid.collection_count, Some(50));
    assert!(invalid.records.iter().all(|r| !r.phone_valid));
    assert_eq!(invalid.next_page_token, None);

    let both = run(PhoneFilter {
        validity: ValidityFilter::from_flags(true, true),
        ..PhoneFilter::default()
    });
    assert_eq!(both.collection_count, Some(101));
    assert_eq!(ids(&both), ids(&page(&store, Some(50), "")));

    let by_code = run(PhoneFilter {
        country_code: Some(212),
        ..PhoneFilter::default()
    });
    assert_eq!(by_code.collection_count, Some(50));
    assert!(by_code
        .records
        .iter()
        .all(|r| r.country_code == Some(212) && r.cust_id.as_deref() == Some("cust-7")));

    let by_number = run(PhoneFilter {
        phone_number: Some(UGANDA_VALID.to_string()),
        ..PhoneFilter::default()
    });
    assert_eq!(by_number.collection_count, Some(51));

    let nothing = run(PhoneFilter {
        phone_number: Some("(256) 000000000".to_string()),
        ..PhoneFilter::default()
    });
    assert_eq!(nothing.collection_count, Some(0));
    assert!(nothing.records.is_empty());
}

#[test]
fn filtered_continuation_skips_non_matching_ids() {
    let store = setup_db();
    let filter = PhoneFilter {
        validity: ValidityFilter::InvalidOnly,
        ..PhoneFilter::default()
    };
    let first = list_page(
        &store,
        &ListPageRequest {
            page_size: Some(10),
            page_token: String::new(),
            filter: filter.clone(),
        },
        &PageLimits::default(),
    )
    .expect("first");
    assert_eq!(ids(&first), (82..=100).rev().step_by(2).collect::<Vec<_>>());
    let token = first.next_page_token.expect("more pages");
    assert_eq!(token, encode_page_token(82));

    let second = list_page(
        &store,
        &ListPageRequest {
            page_size: Some(10),
            page_token: token,
            filter,
        },
        &PageLimits::default(),
    )
    .expect("second");
    assert_eq!(second.records.first().map(|r| r.id), Some(80));
}

#[test]
fn malformed_token_is_invalid_argument() {
    let store = setup_db();
    for token in ["@@@", "YWJj"] {
        let err = list_page(
            &store,
            &ListPageRequest {
                page_size: None,
                page_token: token.to_string(),
                filter: PhoneFilter::default(),
            },
            &PageLimits::default(),
        )
        .expect_err("bad token");
        assert_eq!(err.code, ErrorCode::InvalidArgument);
    }
}

#[test]
fn phone_book_create_recomputes_validity() {
    let store = std::sync::Arc::new(SqliteStore::open_in_memory().expect("open"));
    store.migrate().expect("schema");
    let book = PhoneBook::new(store, PageLimits::default());

    let rec = book
        .create_phone_record(NewPhoneRecord::parse("Cameroon", "(237) 697151594", None).expect("parse"))
        .expect("create");
    assert_eq!(rec.country_code, Some(237));
    assert!(rec.phone_valid);

    let rec = book
        .create_phone_record(
            NewPhoneRecord::parse("Uganda", "Mobile: (256) 775069443", None).expect("parse"),
        )
        .expect("create labelled number");
    assert_eq!(rec.country_code, Some(256));
    assert!(rec.phone_valid);
    assert_eq!(book.get_phone_record(rec.id).expect("get"), rec);

    let rec = book
        .create_phone_record(NewPhoneRecord::parse("Narnia", "(999) 1", None).expect("parse"))
        .expect("create unknown country");
    assert_eq!(rec.country_code, None);
    assert!(!rec.phone_valid);

    assert_eq!(book.get_phone_record(rec.id).expect("get"), rec);
    book.delete_phone_record(rec.id).expect("delete");
    assert_eq!(
        book.get_phone_record(rec.id).expect_err("gone").code,
        ErrorCode::NotFound
    );
    assert_eq!(
        book.delete_phone_record(rec.id).expect_err("gone").code,
        ErrorCode::NotFound
    );
}

#[test]
fn demo_seed_matches_validator() {
    use rand::SeedableRng;
    let store = SqliteStore::open_in_memory().expect("open");
    store.migrate().expect("schema");
    let mut rng = rand::rngs::StdRng::seed_from_u64(7);
    let n = seed_demo_phones(&store, PhoneValidator::standard(), 40, &mut rng).expect("seed");
    assert_eq!(n, 40);
    let all = page(&store, Some(50), "");
    assert_eq!(all.collection_count, Some(40));
    for rec in &all.records {
        let v = PhoneValidator::standard().validate(&rec.country_name, &rec.number);
        assert_eq!(v.valid, rec.phone_valid, "{}", rec.number);
        assert_eq!(v.country_code, rec.country_code);
    }
}

#[test]
fn demo_seed_skips_a_populated_table() {
    use rand::SeedableRng;
    let store = SqliteStore::open_in_memory().expect("open");
    store.migrate().expect("schema");
    let mut rng = rand::rngs::StdRng::seed_from_u64(11);
    let first = seed_demo_phones_if_empty(&store, PhoneValidator::standard(), 12, &mut rng)
        .expect("first seed");
    assert_eq!(first, 12);
    let again = seed_demo_phones_if_empty(&store, PhoneValidator::standard(), 12, &mut rng)
        .expect("second seed");
    assert_eq!(again, 0);
    assert_eq!(page(&store, Some(50), "").collection_count, Some(12));
}

#[test]
fn whitespace_padded_number_is_found_by_exact_filter() {
    let store = std::sync::Arc::new(SqliteStore::open_in_memory().expect("open"));
    store.migrate().expect("schema");
    let book = PhoneBook::new(store, PageLimits::default());
    let rec = book
        .create_phone_record(
            NewPhoneRecord::parse("Uganda", " (256) 775069443  ", None).expect("parse"),
        )
        .expect("create");
    assert_eq!(rec.number, UGANDA_VALID);
    assert!(rec.phone_valid);

    let found = book
        .list_phone_records(&ListPageRequest {
            page_size: None,
            page_token: String::new(),
            filter: PhoneFilter {
                phone_number: Some(UGANDA_VALID.to_string()),
                ..PhoneFilter::default()
            },
        })
        .expect("list");
    assert_eq!(ids(&found), vec![rec.id]);
}
