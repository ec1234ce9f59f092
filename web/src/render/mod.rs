//! Server-side HTML rendering
//!
//! Pages are askama templates under `web/templates/`; every interpolated
//! value is HTML-escaped by the template engine.

mod pages;

pub use pages::{
    render_error, render_follow_index, render_group, render_index, render_login,
    render_post_detail, render_post_form, render_profile, render_signup,
};
