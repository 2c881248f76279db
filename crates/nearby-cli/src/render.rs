//! Plain-text map and list projections.

use std::io::Write;

use nearby_core::{Coordinate, ListProjection, ListRow, MapProjection, PlaceId, PlaceSummary};

fn emit<W: Write>(out: &mut W, line: &str) {
    if let Err(e) = writeln!(out, "{line}") {
        tracing::warn!(error = %e, "failed to write terminal output");
    }
}

/// Text rendering of marker popups and viewport moves.
pub(crate) struct TerminalMap<W> {
    out: W,
    markers: Vec<(PlaceId, PlaceSummary)>,
}

impl<W: Write> TerminalMap<W> {
    pub(crate) fn new(out: W) -> Self {
        Self {
            out,
            markers: Vec::new(),
        }
    }

    #[cfg(test)]
    pub(crate) fn marker_count(&self) -> usize {
        self.markers.len()
    }

    #[cfg(test)]
    pub(crate) fn output(&self) -> &W {
        &self.out
    }
}

impl<W: Write> MapProjection for TerminalMap<W> {
    fn add_marker(&mut self, id: &PlaceId, _coordinate: Coordinate, content: &PlaceSummary) {
        self.markers.push((id.clone(), content.clone()));
    }

    fn remove_all_markers(&mut self) {
        self.markers.clear();
    }

    fn focus(&mut self, coordinate: Coordinate, zoom: u8) {
        emit(&mut self.out, &format!("map: centred on {coordinate} (zoom {zoom})"));
    }

    fn open_detail(&mut self, id: &PlaceId) {
        let Some((_, summary)) = self.markers.iter().find(|(m, _)| m == id) else {
            return;
        };
        let mut lines = vec![format!("┌ {} ({})", summary.name, summary.category)];
        if let Some(cuisine) = &summary.cuisine {
            lines.push(format!("│ cuisine: {cuisine}"));
        }
        if let Some(address) = &summary.address {
            lines.push(format!("│ {address}"));
        }
        lines.push("└".to_owned());
        for line in lines {
            emit(&mut self.out, &line);
        }
    }

    fn close_detail(&mut self, _id: &PlaceId) {}
}

/// Numbered list of results with a `>` marker on the highlighted row.
pub(crate) struct TerminalList<W> {
    out: W,
    rows: Vec<ListRow>,
    highlighted: Option<PlaceId>,
}

impl<W: Write> TerminalList<W> {
    pub(crate) fn new(out: W) -> Self {
        Self {
            out,
            rows: Vec::new(),
            highlighted: None,
        }
    }

    /// Re-prints every row.
    fn print(&mut self) {
        for (i, row) in self.rows.iter().enumerate() {
            let marker = if self.highlighted.as_ref() == Some(&row.id) {
                '>'
            } else {
                ' '
            };
            emit(&mut self.out, &format_row(marker, i + 1, row));
        }
    }

    #[cfg(test)]
    pub(crate) fn output(&self) -> &W {
        &self.out
    }
}

fn format_row(marker: char, position: usize, row: &ListRow) -> String {
    let mut line = format!(
        "{marker} {position:>2}. {} · {} [id {}]",
        row.summary.name, row.summary.category, row.id
    );
    if let Some(distance) = &row.distance {
        line.push_str(" · ");
        line.push_str(distance);
    }
    line
}

impl<W: Write> ListProjection for TerminalList<W> {
    fn render_rows(&mut self, rows: &[ListRow]) {
        self.rows = rows.to_vec();
        self.highlighted = None;
        self.print();
    }

    fn highlight_row(&mut self, id: &PlaceId) {
        self.highlighted = Some(id.clone());
        if let Some((i, row)) = self.rows.iter().enumerate().find(|(_, r)| &r.id == id) {
            emit(&mut self.out, &format_row('>', i + 1, row));
        }
    }

    fn unhighlight_row(&mut self, id: &PlaceId) {
        if self.highlighted.as_ref() == Some(id) {
            self.highlighted = None;
        }
    }

    fn scroll_row_into_view(&mut self, _id: &PlaceId) {}
}
