//! `from`/`size` paging shared by every list endpoint.

use serde::Deserialize;
use utoipa::IntoParams;
use validator::Validate;

const DEFAULT_SIZE: u64 = 10;

fn default_size() -> u64 {
    DEFAULT_SIZE
}

/// `?from=0&size=10`
///
/// `from` is rounded down to a whole page: `from=15&size=10` starts at 10.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageParams {
    /// Number of elements to skip
    #[serde(default)]
    pub from: u64,
    /// Number of elements per page
    #[serde(default = "default_size")]
    #[validate(range(min = 1))]
    pub size: u64,
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            from: 0,
            size: DEFAULT_SIZE,
        }
    }
}

impl PageParams {
    pub fn new(from: u64, size: u64) -> Self {
        Self { from, size }
    }

    pub fn offset(&self) -> u64 {
        if self.size == 0 {
            return 0;
        }
        (self.from / self.size) * self.size
    }

    pub fn limit(&self) -> u64 {
        self.size
    }
}
