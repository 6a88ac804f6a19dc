mod analytics;
mod blog_post;
mod category;
mod comic;
mod comic_page;
mod counter;
mod genre;
mod like;
mod slug;
mod subscriber;
mod tag;
mod user;
