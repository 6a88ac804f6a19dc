use crate::model::analytics::RecountReportDto;

/// Number of counter values corrected per collection by a recount.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecountReport {
    pub genres: u64,
    pub tags: u64,
    pub categories: u64,
}

impl RecountReport {
    pub fn total(&self) -> u64 {
        self.genres + self.tags + self.categories
    }

    pub fn into_dto(self) -> RecountReportDto {
        RecountReportDto {
            genres: self.genres,
            tags: self.tags,
            categories: self.categories,
        }
    }
}
