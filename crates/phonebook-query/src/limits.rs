// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: usize = 50;
pub const MAX_PAGE_SIZE: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLimits {
    pub default_page_size: usize,
    pub max_page_size: usize,
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: MAX_PAGE_SIZE,
        }
    }
}

impl PageLimits {
    /// Result is always in `[1, max_page_size]`.
    #[must_use]
    pub fn clamp_page_size(&self, requested: Option<i64>) -> usize {
        let max = self.max_page_size.max(1);
        match requested {
            Some(n) if n > 0 => usize::try_from(n).map_or(max, |n| n.min(max)),
            _ => self.default_page_size.clamp(1, max),
        }
    }
}
