mod layout;
mod paginate;

pub use paginate::{page_count, page_windows};

use pdf_writer::{Content, Filter, Name, Pdf, Rect, Ref, Str};

use crate::error::Error;
use crate::fonts::{Face, FontSet, register_fonts, to_winansi_bytes};
use crate::model::{Message, PageWindow, ThreadConfig};
use crate::thread::ComposedThread;

use layout::{Element, ThreadLayout, layout_thread};

// US Letter page frames with a fixed content window. All units are points.
const PAGE_WIDTH: f32 = 612.0;
const PAGE_HEIGHT: f32 = 792.0;
const MARGIN: f32 = 54.0;
const HEADER_BAND: f32 = 36.0;
const FOOTER_BAND: f32 = 30.0;

pub const CONTENT_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN;
pub const CONTENT_HEIGHT: f32 = PAGE_HEIGHT - 2.0 * MARGIN - HEADER_BAND - FOOTER_BAND;

const CHROME_SIZE: f32 = 9.0;
const CHROME_GRAY: f32 = 0.4;
const RULE_GRAY: f32 = 0.75;

fn subject_line(config: &ThreadConfig) -> String {
    format!("Approval request: {} ({})", config.event_name, config.amount)
}

/// Synthetic capture identifier shown in the page footer. Derived from the
/// profile so repeated exports of the same thread carry the same mark.
fn capture_id(config: &ThreadConfig) -> String {
    let mut h: u64 = 0xcbf2_9ce4_8422_2325;
    for b in config
        .event_name
        .bytes()
        .chain(config.sender_email.bytes())
        .chain(config.base_date.bytes())
        .chain(config.base_time.bytes())
    {
        h ^= u64::from(b);
        h = h.wrapping_mul(0x0100_0000_01b3);
    }
    format!("mailproof {:08x}", (h >> 32) as u32 ^ h as u32)
}

/// Emit the laid-out thread as one content stream. The stream's own
/// coordinate space puts the top of the thread at y = 0 and grows downward
/// into negative y, so a page can show the slice starting at `offset` by
/// translating the stream up by that amount.
fn thread_stream(layout: &ThreadLayout, fonts: &FontSet) -> Vec<u8> {
    let mut content = Content::new();

    content.save_state();
    content.set_stroke_gray(RULE_GRAY);
    content.set_line_width(0.5);
    for element in &layout.elements {
        if let Element::Rule { y, width } = element {
            content.move_to(0.0, -y);
            content.line_to(*width, -y);
            content.stroke();
        }
    }
    content.restore_state();

    content.begin_text();
    let mut cur_face: Option<Face> = None;
    let mut cur_size: f32 = -1.0;
    let mut cur_gray: f32 = -1.0;
    let mut td_x = 0.0f32;
    let mut td_y = 0.0f32;

    for element in &layout.elements {
        let Element::Text { x, baseline_y, face, size, gray, text } = element else {
            continue;
        };
        if text.is_empty() {
            continue;
        }

        if cur_face != Some(*face) || cur_size != *size {
            let entry = &fonts[face];
            content.set_font(Name(entry.pdf_name.as_bytes()), *size);
            cur_face = Some(*face);
            cur_size = *size;
        }
        if cur_gray != *gray {
            content.set_fill_gray(*gray);
            cur_gray = *gray;
        }

        let y = -baseline_y;
        content.next_line(x - td_x, y - td_y);
        td_x = *x;
        td_y = y;
        content.show(Str(&to_winansi_bytes(text)));
    }
    content.end_text();

    content.finish().to_vec()
}

fn chrome_text(content: &mut Content, fonts: &FontSet, face: Face, x: f32, y: f32, text: &str) {
    let entry = &fonts[&face];
    content
        .begin_text()
        .set_font(Name(entry.pdf_name.as_bytes()), CHROME_SIZE)
        .next_line(x, y)
        .show(Str(&to_winansi_bytes(text)))
        .end_text();
}

fn right_aligned_x(fonts: &FontSet, face: Face, text: &str) -> f32 {
    PAGE_WIDTH - MARGIN - fonts[&face].word_width(text, CHROME_SIZE)
}

/// Per-page chrome: header band with the capture timestamp label and the
/// thread title, footer band with the synthetic identifier and the page
/// counter, both separated from the content window by a hairline rule.
fn render_chrome(
    content: &mut Content,
    fonts: &FontSet,
    timestamp_label: &str,
    title: &str,
    identifier: &str,
    page_num: usize,
    total_pages: usize,
) {
    let header_baseline = PAGE_HEIGHT - MARGIN - CHROME_SIZE;
    let footer_baseline = MARGIN + FOOTER_BAND - CHROME_SIZE - 12.0;

    content.set_fill_gray(CHROME_GRAY);
    chrome_text(content, fonts, Face::Regular, MARGIN, header_baseline, timestamp_label);
    let title_x = right_aligned_x(fonts, Face::Bold, title);
    chrome_text(content, fonts, Face::Bold, title_x, header_baseline, title);

    chrome_text(content, fonts, Face::Regular, MARGIN, footer_baseline, identifier);
    let counter = format!("Page {page_num} of {total_pages}");
    let counter_x = right_aligned_x(fonts, Face::Regular, &counter);
    chrome_text(content, fonts, Face::Regular, counter_x, footer_baseline, &counter);
    content.set_fill_gray(0.0);

    let header_rule_y = PAGE_HEIGHT - MARGIN - HEADER_BAND + 6.0;
    let footer_rule_y = MARGIN + FOOTER_BAND - 6.0;
    content.save_state();
    content.set_stroke_gray(RULE_GRAY);
    content.set_line_width(0.5);
    content.move_to(MARGIN, header_rule_y);
    content.line_to(PAGE_WIDTH - MARGIN, header_rule_y);
    content.stroke();
    content.move_to(MARGIN, footer_rule_y);
    content.line_to(PAGE_WIDTH - MARGIN, footer_rule_y);
    content.stroke();
    content.restore_state();
}

struct SharedStream {
    xobject_ref: Ref,
    fonts: FontSet,
    total_height: f32,
}

const THREAD_XOBJECT: &[u8] = b"T0";

/// Render the composed thread once into a Form XObject. Every page (and the
/// preview) places this one object, so all views are pixel-consistent slices
/// of the same stream.
fn build_shared_stream(
    pdf: &mut Pdf,
    alloc: &mut impl FnMut() -> Ref,
    config: &ThreadConfig,
    messages: &[Message],
) -> SharedStream {
    let fonts = register_fonts(pdf, alloc);
    let layout = layout_thread(&subject_line(config), messages, &fonts, CONTENT_WIDTH);
    let data = thread_stream(&layout, &fonts);
    let compressed = miniz_oxide::deflate::compress_to_vec_zlib(&data, 6);

    let xobject_ref = alloc();
    let mut xobj = pdf.form_xobject(xobject_ref, &compressed);
    xobj.filter(Filter::FlateDecode);
    xobj.bbox(Rect::new(0.0, -layout.total_height, CONTENT_WIDTH, 0.0));
    {
        let mut resources = xobj.resources();
        let mut font_dict = resources.fonts();
        for (name, font_ref) in sorted_font_pairs(&fonts) {
            font_dict.pair(Name(name.as_bytes()), font_ref);
        }
    }

    SharedStream {
        xobject_ref,
        fonts,
        total_height: layout.total_height,
    }
}

// Resource dictionaries are written in pdf_name order so repeated exports of
// the same profile are byte-identical.
fn sorted_font_pairs(fonts: &FontSet) -> Vec<(String, Ref)> {
    let mut pairs: Vec<(String, Ref)> = fonts
        .values()
        .map(|e| (e.pdf_name.clone(), e.font_ref))
        .collect();
    pairs.sort_by(|a, b| a.0.cmp(&b.0));
    pairs
}

fn write_page_resources(page: &mut pdf_writer::writers::Page, fonts: &FontSet, xobject_ref: Ref) {
    let mut resources = page.resources();
    {
        let mut font_dict = resources.fonts();
        for (name, font_ref) in sorted_font_pairs(fonts) {
            font_dict.pair(Name(name.as_bytes()), font_ref);
        }
    }
    resources
        .x_objects()
        .pair(Name(THREAD_XOBJECT), xobject_ref);
}

/// The print/export artifact: N fixed-size page frames, each clipping a
/// `CONTENT_HEIGHT` window out of the shared thread stream shifted up by
/// that page's offset, with header/footer chrome around the window.
pub fn render_export(config: &ThreadConfig, thread: &ComposedThread) -> Result<Vec<u8>, Error> {
    let t0 = std::time::Instant::now();
    let mut pdf = Pdf::new();
    let mut next_id = 1i32;
    let mut alloc = || {
        let r = Ref::new(next_id);
        next_id += 1;
        r
    };

    let catalog_id = alloc();
    let pages_id = alloc();

    let shared = build_shared_stream(&mut pdf, &mut alloc, config, &thread.messages);
    let windows: Vec<PageWindow> = page_windows(shared.total_height, CONTENT_HEIGHT);
    let total_pages = windows.len();

    let title = subject_line(config);
    let identifier = capture_id(config);
    let timestamp_label = thread
        .messages
        .first()
        .map(|m| m.timestamp.clone())
        .unwrap_or_default();

    let content_top = PAGE_HEIGHT - MARGIN - HEADER_BAND;
    let content_bottom = content_top - CONTENT_HEIGHT;

    let page_ids: Vec<Ref> = windows.iter().map(|_| alloc()).collect();
    let content_ids: Vec<Ref> = windows.iter().map(|_| alloc()).collect();

    for window in &windows {
        let mut content = Content::new();

        render_chrome(
            &mut content,
            &shared.fonts,
            &timestamp_label,
            &title,
            &identifier,
            window.index + 1,
            total_pages,
        );

        // Clip to the content window, then place the shared stream shifted
        // upward by this page's offset so consecutive pages show contiguous,
        // non-overlapping slices.
        content.save_state();
        content.rect(MARGIN, content_bottom, CONTENT_WIDTH, CONTENT_HEIGHT);
        content.clip_nonzero();
        content.end_path();
        content.transform([1.0, 0.0, 0.0, 1.0, MARGIN, content_top + window.offset]);
        content.x_object(Name(THREAD_XOBJECT));
        content.restore_state();

        let raw = content.finish();
        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(&raw, 6);
        pdf.stream(content_ids[window.index], &compressed)
            .filter(Filter::FlateDecode);
    }

    pdf.catalog(catalog_id).pages(pages_id);
    pdf.pages(pages_id)
        .kids(page_ids.iter().copied())
        .count(total_pages as i32);

    for (i, page_id) in page_ids.iter().enumerate() {
        let mut page = pdf.page(*page_id);
        page.media_box(Rect::new(0.0, 0.0, PAGE_WIDTH, PAGE_HEIGHT))
            .parent(pages_id)
            .contents(content_ids[i]);
        write_page_resources(&mut page, &shared.fonts, shared.xobject_ref);
    }

    log::info!(
        "export: {} messages, {:.1}pt rendered, {} pages, {:.1}ms",
        thread.messages.len(),
        shared.total_height,
        total_pages,
        t0.elapsed().as_secs_f64() * 1000.0,
    );

    Ok(pdf.finish())
}

/// The on-screen preview: a single page tall enough for the whole thread,
/// the same shared stream placed once, unclipped, with no page chrome.
pub fn render_preview(config: &ThreadConfig, thread: &ComposedThread) -> Result<Vec<u8>, Error> {
    let t0 = std::time::Instant::now();
    let mut pdf = Pdf::new();
    let mut next_id = 1i32;
    let mut alloc = || {
        let r = Ref::new(next_id);
        next_id += 1;
        r
    };

    let catalog_id = alloc();
    let pages_id = alloc();

    let shared = build_shared_stream(&mut pdf, &mut alloc, config, &thread.messages);
    let page_height = shared.total_height + 2.0 * MARGIN;

    let page_id = alloc();
    let content_id = alloc();

    let mut content = Content::new();
    content.save_state();
    content.transform([1.0, 0.0, 0.0, 1.0, MARGIN, page_height - MARGIN]);
    content.x_object(Name(THREAD_XOBJECT));
    content.restore_state();

    let raw = content.finish();
    let compressed = miniz_oxide::deflate::compress_to_vec_zlib(&raw, 6);
    pdf.stream(content_id, &compressed).filter(Filter::FlateDecode);

    pdf.catalog(catalog_id).pages(pages_id);
    pdf.pages(pages_id).kids([page_id]).count(1);

    {
        let mut page = pdf.page(page_id);
        page.media_box(Rect::new(0.0, 0.0, PAGE_WIDTH, page_height))
            .parent(pages_id)
            .contents(content_id);
        write_page_resources(&mut page, &shared.fonts, shared.xobject_ref);
    }

    log::info!(
        "preview: {} messages, {:.1}pt rendered, {:.1}ms",
        thread.messages.len(),
        shared.total_height,
        t0.elapsed().as_secs_f64() * 1000.0,
    );

    Ok(pdf.finish())
}
