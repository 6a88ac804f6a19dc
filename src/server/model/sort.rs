use crate::server::error::AppError;

/// Ordering of comic and blog post listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContentSort {
    /// Most recently created first.
    #[default]
    Newest,
    Oldest,
    /// Most viewed first.
    Popular,
    /// Most liked first.
    Liked,
    /// Alphabetical by title.
    Title,
}

impl ContentSort {
    /// Parses the `sort` query parameter; absent means [`ContentSort::Newest`].
    pub fn parse(value: Option<&str>) -> Result<Self, AppError> {
        match value.map(str::trim) {
            None | Some("") | Some("newest") => Ok(Self::Newest),
            Some("oldest") => Ok(Self::Oldest),
            Some("popular") => Ok(Self::Popular),
            Some("liked") => Ok(Self::Liked),
            Some("title") => Ok(Self::Title),
            Some(other) => Err(AppError::BadRequest(format!(
                "unknown sort '{}', expected newest, oldest, popular, liked or title",
                other
            ))),
        }
    }
}
