use std::sync::Arc;

use phonebook_core::ErrorCode;
use phonebook_model::{Country, NewPhoneRecord, PhoneRecord, ValidatedPhone};
use phonebook_query::{
    ListPageRequest, PageLimits, PhoneBook, PhoneFilter, PhoneStore, RecordQuery, StoreError,
};

struct BrokenStore;

impl PhoneStore for BrokenStore {
    fn create(&self, _: &ValidatedPhone) -> Result<PhoneRecord, StoreError> {
        Err(StoreError("disk I/O error".to_string()))
    }
    fn find_by_id(&self, _: u64) -> Result<Option<PhoneRecord>, StoreError> {
        Err(StoreError("disk I/O error".to_string()))
    }
    fn delete(&self, _: u64) -> Result<bool, StoreError> {
        Err(StoreError("disk I/O error".to_string()))
    }
    fn query(&self, _: &RecordQuery<'_>) -> Result<Vec<PhoneRecord>, StoreError> {
        Err(StoreError("disk I/O error".to_string()))
    }
    fn count(&self, _: &PhoneFilter) -> Result<u64, StoreError> {
        Err(StoreError("disk I/O error".to_string()))
    }
    fn countries(&self) -> Result<Vec<Country>, StoreError> {
        Err(StoreError("disk I/O error".to_string()))
    }
}

#[test]
fn storage_errors_surface_as_internal_without_detail() {
    let book = PhoneBook::new(Arc::new(BrokenStore), PageLimits::default());

    let err = book
        .list_phone_records(&ListPageRequest::default())
        .expect_err("list");
    assert_eq!(err.code, ErrorCode::Internal);
    assert!(!err.message.contains("disk"));

    let err = book
        .create_phone_record(NewPhoneRecord::parse("Uganda", "(256) 775069443", None).expect("parse"))
        .expect_err("create");
    assert_eq!(err.code, ErrorCode::Internal);

    assert_eq!(book.get_phone_record(1).expect_err("get").code, ErrorCode::Internal);
    assert_eq!(book.delete_phone_record(1).expect_err("delete").code, ErrorCode::Internal);
    assert_eq!(book.countries().expect_err("countries").code, ErrorCode::Internal);
}

#[test]
fn token_errors_win_over_storage_errors() {
    let book = PhoneBook::new(Arc::new(BrokenStore), PageLimits::default());
    let err = book
        .list_phone_records(&ListPageRequest {
            page_token: "not base64!".to_string(),
            ..ListPageRequest::default()
        })
        .expect_err("bad token");
    assert_eq!(err.code, ErrorCode::InvalidArgument);
}
