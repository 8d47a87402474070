//! Domain entities - the core business objects.

mod blog;
mod block;
mod calendar;
mod comment;
mod tag;
mod toast;
mod voting;

pub use block::{BlockKind, BlogBlock, CalloutVariant, HeadingLevel, ListStyle};
pub use blog::{
    Blog, BlogLayout, BlogLink, BlogMeta, BlogPreview, BlogSettings, BlogSocialShare, LayoutType,
    LinkType, SocialPlatform, slugify,
};
pub use calendar::{
    CalendarCursor, CalendarEvent, CalendarEventGroup, CalendarView, events_on, group_by_date,
};
pub use comment::{Comment, CommentDraft, relative_time};
pub use tag::Tag;
pub use toast::{Toast, ToastVariant};
pub use voting::{BlogVoting, UserVote, VoteCall, VoteTally};
