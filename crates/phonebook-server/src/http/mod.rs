// SPDX-License-Identifier: Apache-2.0

pub(crate) mod browse;
pub(crate) mod handlers;
pub(crate) mod phones;
pub(crate) mod render;
pub(crate) mod request_tracing;
pub(crate) mod response_contract;
