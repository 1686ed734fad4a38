// src/cookies.rs
//! Cookies: the [`PageCookies`] jar and the `document.cookie`-style adapter
//! built on top of it.

mod adapter;
mod jar;

pub use adapter::get_cookie;
pub use adapter::set_cookie;

pub use jar::CookieRecord;
pub use jar::CookiesHandle;
pub use jar::InMemoryPageCookies;
pub use jar::PageCookies;
