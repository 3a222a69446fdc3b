//! Output sinks for the report flow.
//!
//! The report pipeline renders database snapshots into one HTML document
//! and hands it to a mail transport:
//!
//! - [`html`]: table fragments and the assembled report document
//! - [`email`]: SMTP delivery of the finished document

pub mod email;
pub mod html;
