use std::io::{BufRead, Write};
use std::path::Path;

use anyhow::Result;

use crate::classify::scores;
use crate::data::filter::RowFilter;
use crate::report::{build_report, render_statistics, write_report, write_statistics_json};
use crate::state::AppState;
use crate::ui::menu::{parse_category, parse_min_count, MenuChoice, MENU};
use crate::ui::plot::{render_dashboard, save_dashboard, ChartKind};
use crate::ui::upload::Upload;
use crate::ui::views;

pub const TITLE: &str = "E-Waste Data Explorer";

// ---------------------------------------------------------------------------
// Interactive session
// ---------------------------------------------------------------------------

pub struct ExplorerApp {
    pub state: AppState,
}

enum Flow {
    Continue,
    Exit,
}

impl ExplorerApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Run the menu loop until the user exits or `input` is exhausted.
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, mut out: W) -> Result<()> {
        writeln!(out, "{TITLE}")?;
        loop {
            writeln!(out)?;
            writeln!(out, "{MENU}")?;
            let Some(line) = prompt(&mut input, &mut out, "Choose an option (1-7): ")? else {
                break;
            };
            let Some(choice) = MenuChoice::parse(&line) else {
                writeln!(
                    out,
                    "Invalid choice '{}'. Please enter a number from 1 to 7.",
                    line.trim()
                )?;
                continue;
            };
            log::debug!("menu: {choice}");
            if let Flow::Exit = self.dispatch(choice, &mut input, &mut out)? {
                break;
            }
        }
        writeln!(out, "Goodbye!")?;
        Ok(())
    }

    fn dispatch<R: BufRead, W: Write>(
        &mut self,
        choice: MenuChoice,
        input: &mut R,
        out: &mut W,
    ) -> Result<Flow> {
        match choice {
            MenuChoice::ShowAll => {
                let view = self.state.show_all();
                views::write_table(out, view)?;
            }
            MenuChoice::FilterCategory => {
                let Some(line) = prompt(input, out, "Enter category: ")? else {
                    return Ok(Flow::Exit);
                };
                let parsed = parse_category(&line, &self.state.known_categories());
                match parsed {
                    Ok(category) => {
                        let view = self.state.set_filter(RowFilter::by_category(category));
                        views::write_table(out, view)?;
                    }
                    Err(e) => writeln!(out, "{e}")?,
                }
            }
            MenuChoice::FilterMinCount => {
                let Some(line) = prompt(input, out, "Enter minimum count: ")? else {
                    return Ok(Flow::Exit);
                };
                match parse_min_count(&line) {
                    Ok(min) => {
                        let view = self.state.set_filter(RowFilter::by_min_count(min));
                        views::write_table(out, view)?;
                    }
                    Err(e) => writeln!(out, "{e}")?,
                }
            }
            MenuChoice::Report => self.generate_report(out)?,
            MenuChoice::Visualize => self.visualize(out)?,
            MenuChoice::Classify => {
                let Some(line) = prompt(input, out, "Enter the path of the image to upload: ")?
                else {
                    return Ok(Flow::Exit);
                };
                self.classify_upload(line.trim(), out)?;
            }
            MenuChoice::Exit => return Ok(Flow::Exit),
        }
        Ok(Flow::Continue)
    }

    fn generate_report<W: Write>(&mut self, out: &mut W) -> Result<()> {
        let report = build_report(&self.state.dataset);
        let path = self.state.settings.report_path.clone();
        match write_report(&report, &path) {
            Ok(()) => writeln!(out, "Report saved to {}", path.display())?,
            Err(e) => {
                log::error!("{e:#}");
                writeln!(out, "Could not save the report: {e:#}")?;
            }
        }

        if let Some(json_path) = self.state.settings.stats_json_path.clone() {
            match write_statistics_json(&report.statistics, &json_path) {
                Ok(()) => writeln!(out, "Statistics saved to {}", json_path.display())?,
                Err(e) => {
                    log::error!("{e:#}");
                    writeln!(out, "Could not save the statistics: {e:#}")?;
                }
            }
        }

        writeln!(out, "Category statistics:")?;
        write!(out, "{}", render_statistics(&report.statistics))?;
        Ok(())
    }

    fn visualize<W: Write>(&mut self, out: &mut W) -> Result<()> {
        let dashboard = render_dashboard(&self.state.dataset);
        let path = self.state.settings.chart_path.clone();
        match save_dashboard(&dashboard, &path) {
            Ok(()) => {
                writeln!(out, "Charts saved to {}", path.display())?;
                for kind in ChartKind::ALL {
                    writeln!(out, "  {}", kind.title())?;
                }
                views::write_legend(out, &dashboard.legend)?;
            }
            Err(e) => {
                log::error!("{e:#}");
                writeln!(out, "Could not save the charts: {e:#}")?;
            }
        }
        Ok(())
    }

    fn classify_upload<W: Write>(&mut self, path: &str, out: &mut W) -> Result<()> {
        if path.is_empty() {
            writeln!(out, "No file given.")?;
            return Ok(());
        }
        let upload = match Upload::from_path(Path::new(path)) {
            Ok(u) => u,
            Err(e) => {
                log::warn!("{e:#}");
                writeln!(out, "Could not read the upload: {e:#}")?;
                return Ok(());
            }
        };

        views::write_preview(out, &upload.file_name, upload.preview())?;
        let result = self.state.classify_upload(&upload.file_name);
        views::write_classification(out, &result, &scores(&upload.file_name))?;

        if let Some(label) = result.label {
            writeln!(out, "Rows for category '{label}':")?;
            let view = self.state.set_filter(RowFilter::by_category(label.as_str()));
            views::write_table(out, view)?;
        }
        Ok(())
    }
}

/// Show `text`, then read one line. `None` at end of input.
fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W, text: &str) -> Result<Option<String>> {
    write!(out, "{text}")?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        writeln!(out)?;
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}
