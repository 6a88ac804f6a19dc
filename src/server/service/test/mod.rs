mod blog;
mod comic;
mod comic_page;
mod like;
