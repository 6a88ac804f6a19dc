use entity::prelude::*;
use sea_orm::{sea_query::TableCreateStatement, EntityName, EntityTrait, Schema};

use crate::{context::TestContext, error::TestError};

/// Builder for creating test contexts with customizable database schemas.
///
/// Provides a fluent interface for configuring test environments with in-memory SQLite
/// databases. Use the builder pattern to add entity tables, then call `build()` to
/// create the configured test context.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::builder::TestBuilder;
/// use entity::prelude::{Genre, Comic};
///
/// let test = TestBuilder::new()
///     .with_table(Genre)
///     .with_table(Comic)
///     .build()
///     .await?;
/// ```
pub struct TestBuilder {
    /// CREATE TABLE statements to execute during database setup, in insertion order.
    tables: Vec<TableCreateStatement>,
    /// Names of the tables already queued, so convenience sets can overlap.
    names: Vec<String>,
}

impl TestBuilder {
    /// Creates a new test builder with no tables configured.
    ///
    /// # Returns
    /// - New `TestBuilder` instance with empty table configuration
    pub fn new() -> Self {
        Self {
            tables: Vec::new(),
            names: Vec::new(),
        }
    }

    /// Adds an entity table to the test database schema.
    ///
    /// Generates a CREATE TABLE statement from the provided SeaORM entity using SQLite
    /// backend syntax. Tables should be added in dependency order (tables with foreign
    /// keys after their referenced tables). Adding the same entity twice is a no-op.
    ///
    /// # Arguments
    /// - `entity` - SeaORM entity implementing `EntityTrait` to create a table for
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let name = entity.table_name().to_string();
        if self.names.contains(&name) {
            return self;
        }

        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self.names.push(name);
        self
    }

    /// Adds the tables required for comic operations.
    ///
    /// Adds, in dependency order: Genre, Tag, Comic, ComicTag, ComicPage, ComicLike
    /// and ViewEvent.
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_comic_tables(self) -> Self {
        self.with_table(Genre)
            .with_table(Tag)
            .with_table(Comic)
            .with_table(ComicTag)
            .with_table(ComicPage)
            .with_table(ComicLike)
            .with_table(ViewEvent)
    }

    /// Adds the tables required for blog operations.
    ///
    /// Adds, in dependency order: User, Category, BlogPost, BlogPostLike and ViewEvent.
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_blog_tables(self) -> Self {
        self.with_table(User)
            .with_table(Category)
            .with_table(BlogPost)
            .with_table(BlogPostLike)
            .with_table(ViewEvent)
    }

    /// Adds every table in the schema.
    ///
    /// Use this for analytics, maintenance and router tests that touch several
    /// collections at once.
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_all_tables(self) -> Self {
        self.with_blog_tables()
            .with_comic_tables()
            .with_table(Subscriber)
    }

    /// Builds and initializes the test context with configured tables.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Fully initialized test context with database and tables ready
    /// - `Err(TestError::Database)`- Failed to connect to database or create tables
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut setup = TestContext::new();

        setup.with_tables(self.tables).await?;

        Ok(setup)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
