// SPDX-License-Identifier: Apache-2.0

use phonebook_core::ResultExt;

#[test]
fn result_ext_attaches_static_context_without_allocation() {
    let r: Result<(), &str> = Err("disk full");
    let err = r.with_context("migrate schema").expect_err("must error");
    assert_eq!(err.context, "migrate schema");
    assert_eq!(err.source, "disk full");
    assert_eq!(err.to_string(), "migrate schema: disk full");
}
