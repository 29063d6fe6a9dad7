use crate::model::PageWindow;

/// Number of fixed-height pages needed to show `total_height` of rendered
/// content through windows of `content_height`: `max(1, ceil(h / c))`.
/// Empty content still produces one page.
pub fn page_count(total_height: f32, content_height: f32) -> usize {
    if content_height <= 0.0 || total_height <= 0.0 {
        return 1;
    }
    ((total_height / content_height).ceil() as usize).max(1)
}

/// Vertical clip offsets for each page window. Window `p` shows the slice
/// `[p * content_height, (p + 1) * content_height)` of the single rendered
/// stream: consecutive windows are contiguous and non-overlapping, and a
/// message straddling a boundary is cut at the pixel boundary, not reflowed.
pub fn page_windows(total_height: f32, content_height: f32) -> Vec<PageWindow> {
    (0..page_count(total_height, content_height))
        .map(|index| PageWindow {
            index,
            offset: index as f32 * content_height,
        })
        .collect()
}
