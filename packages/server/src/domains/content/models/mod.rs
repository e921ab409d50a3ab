// Content models - one module per content kind

pub mod download;
pub mod event;
pub mod news;
pub mod project;

pub use download::{Download, DownloadInput};
pub use event::{Event, EventInput};
pub use news::{NewsItem, NewsInput};
pub use project::{Project, ProjectInput};
