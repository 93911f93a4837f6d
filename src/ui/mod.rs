//! UI module for rendering the TUI

mod components;
pub mod forms;
mod layout;

use crate::app::App;
use crate::state::View;
use components::{render_error_dialog, render_receipt_dialog};
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let (header_area, main_area, status_area) = layout::create_layout(area);

    layout::draw_header(frame, header_area, app);
    // The wizard stays visible under the receipt dialog
    forms::draw_wizard(frame, main_area, app);
    layout::draw_status_bar(frame, status_area, app);

    if app.state.current_view == View::Submitted {
        if let Some(receipt) = &app.state.last_receipt {
            render_receipt_dialog(frame, receipt);
        }
    }

    // Draw error dialog overlay if there are errors
    if let Some(error) = app.state.current_error() {
        render_error_dialog(frame, error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::forms::{catalog, Revalidation};
    use crate::state::{AppState, SteppedForm};
    use crate::submit::{LogSink, SubmitReceipt};
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

    fn app_for(form: &str) -> App {
        let definition = catalog::by_name(form).unwrap();
        let form = SteppedForm::new(definition, Revalidation::CurrentStep).unwrap();
        App::new(AppState::new(form), Box::new(LogSink))
    }

    fn render(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        buffer_text(terminal.backend().buffer())
    }

    fn buffer_text(buffer: &Buffer) -> String {
        let area = buffer.area;
        let mut text = String::new();
        for y in 0..area.height {
            for x in 0..area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_draw_first_step() {
        let text = render(&app_for("checkout"));
        assert!(text.contains("Checkout"));
        assert!(text.contains("Billing Info"));
        assert!(text.contains("Step 1 of 3"));
        assert!(text.contains("First Name *"));
        assert!(text.contains("Actions"));
        assert!(text.contains("Next"));
        assert!(!text.contains("Prev"));
        assert!(text.contains("logging submissions"));
    }

    #[test]
    fn test_draw_conditional_step_notice() {
        let mut app = app_for("onboarding");
        for (name, value) in [
            ("name", "Sam"),
            ("email", "sam@example.com"),
            ("age", "15"),
            ("password", "hunter2"),
        ] {
            app.state.form.on_field_change(name, value).unwrap();
        }
        assert!(app.state.step_next());
        assert!(app.state.step_next());

        let text = render(&app);
        assert!(text.contains("Step 3 of 4"));
        assert!(text.contains("parent or guardian"));
    }

    #[test]
    fn test_draw_receipt_and_error_overlays() {
        let mut app = app_for("checkout");
        app.state.finish(SubmitReceipt::new("Checkout"));
        let text = render(&app);
        assert!(text.contains("Submitted"));
        assert!(text.contains("Thank you"));

        app.state.push_error("Failed to submit: disk full");
        let text = render(&app);
        assert!(text.contains("disk full"));
    }
}
