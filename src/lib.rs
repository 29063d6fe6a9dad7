mod error;
mod fonts;
mod model;
mod pdf;
mod profile;
mod thread;
mod timestamp;

pub use error::Error;
pub use model::{Approver, Message, MessageKind, PageWindow, ThreadConfig, mailbox};
pub use pdf::{CONTENT_HEIGHT, CONTENT_WIDTH, page_count, page_windows, render_export, render_preview};
pub use profile::Profile;
pub use thread::{ComposedThread, compose, reconcile_order, resolve_recipients};
pub use timestamp::format_timestamp;

use std::path::Path;
use std::time::Instant;

/// Load a thread profile and export it as the paged, print-style PDF.
///
/// One update cycle, in order: the profile loader reconciles the recipient
/// order, the composer derives the message sequence, the renderer measures
/// the rendered stream and derives the page windows. Nothing stale survives
/// between the steps.
pub fn export_profile_to_pdf(input: &Path, output: &Path) -> Result<(), Error> {
    let t0 = Instant::now();

    let profile = Profile::load(input)?;
    let t_parse = t0.elapsed();

    let thread = compose(&profile.config, &profile.approvers, &profile.recipient_order);
    let bytes = render_export(&profile.config, &thread)?;
    let t_render = t0.elapsed();

    std::fs::write(output, &bytes).map_err(Error::Io)?;
    let t_total = t0.elapsed();

    log::info!(
        "Timing: parse={:.1}ms, render={:.1}ms, write={:.1}ms, total={:.1}ms (output {} bytes)",
        t_parse.as_secs_f64() * 1000.0,
        (t_render - t_parse).as_secs_f64() * 1000.0,
        (t_total - t_render).as_secs_f64() * 1000.0,
        t_total.as_secs_f64() * 1000.0,
        bytes.len(),
    );

    Ok(())
}

/// Same pipeline from in-memory profile JSON.
pub fn export_profile_bytes_to_pdf(input: &[u8], output: &Path) -> Result<(), Error> {
    let t0 = Instant::now();

    let profile = Profile::from_json(input)?;
    let t_parse = t0.elapsed();

    let thread = compose(&profile.config, &profile.approvers, &profile.recipient_order);
    let bytes = render_export(&profile.config, &thread)?;
    let t_render = t0.elapsed();

    std::fs::write(output, &bytes).map_err(Error::Io)?;
    let t_total = t0.elapsed();

    log::info!(
        "Timing: parse={:.1}ms, render={:.1}ms, write={:.1}ms, total={:.1}ms (output {} bytes)",
        t_parse.as_secs_f64() * 1000.0,
        (t_render - t_parse).as_secs_f64() * 1000.0,
        (t_total - t_render).as_secs_f64() * 1000.0,
        t_total.as_secs_f64() * 1000.0,
        bytes.len(),
    );

    Ok(())
}

/// Load a thread profile and export the on-screen view: one continuous,
/// unclipped page with no page chrome.
pub fn preview_profile_to_pdf(input: &Path, output: &Path) -> Result<(), Error> {
    let t0 = Instant::now();

    let profile = Profile::load(input)?;
    let thread = compose(&profile.config, &profile.approvers, &profile.recipient_order);
    let bytes = render_preview(&profile.config, &thread)?;
    std::fs::write(output, &bytes).map_err(Error::Io)?;

    log::info!(
        "Preview: total={:.1}ms (output {} bytes)",
        t0.elapsed().as_secs_f64() * 1000.0,
        bytes.len(),
    );

    Ok(())
}
