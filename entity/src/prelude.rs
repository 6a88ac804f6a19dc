pub use super::blog_post::Entity as BlogPost;
pub use super::blog_post_like::Entity as BlogPostLike;
pub use super::category::Entity as Category;
pub use super::comic::Entity as Comic;
pub use super::comic_like::Entity as ComicLike;
pub use super::comic_page::Entity as ComicPage;
pub use super::comic_tag::Entity as ComicTag;
pub use super::genre::Entity as Genre;
pub use super::subscriber::Entity as Subscriber;
pub use super::tag::Entity as Tag;
pub use super::user::Entity as User;
pub use super::view_event::Entity as ViewEvent;
