//! Editor area: the interactive drawing view.
//!
//! # Responsibility
//! - Route pointer events to the active tool and commit finished strokes
//!   into the current page.
//! - Keep the view consistent: status messages when there is nothing to
//!   draw on, input disabled while a message shows, repaints debounced.
//!
//! # Invariants
//! - Input is enabled exactly when no status message is set.
//! - Committed strokes land in the current page's first layer; the layer
//!   is created on first commit.
//! - Removing the current page falls back to the nearest remaining index
//!   instead of leaving a dangling selection.

use crate::model::{Layer, Listeners, Notebook, Page, Stroke};
use crate::render::Surface;
use crate::tool::{FinishedStroke, Pen, PenTool, PointerEvent, RedrawScheduler};
use log::info;
use std::time::Instant;

/// Shown when no notebook has been attached.
pub const MSG_NO_NOTEBOOK: &str = "No Notebook Loaded";
/// Shown when the attached notebook has no pages.
pub const MSG_EMPTY_NOTEBOOK: &str = "Empty Notebook";

/// Notification emitted by the editor area.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    NotebookChanged,
    CurrentPageChanged { page: Option<usize> },
    ToolActivate,
    ToolDeactivate,
    ToolChange { index: usize },
    ToolFinish,
    EnabledChanged { enabled: bool },
}

/// Interactive drawing view over one notebook.
pub struct EditorArea {
    notebook: Option<Notebook>,
    current_page: Option<usize>,
    tools: Vec<PenTool>,
    current_tool: usize,
    message: Option<String>,
    enabled: bool,
    /// Most recent host-reported available area, for autosizing pages.
    available_area: Option<(u32, u32)>,
    scheduler: RedrawScheduler,
    listeners: Listeners<EditorEvent>,
}

impl EditorArea {
    pub fn new() -> Self {
        let mut area = Self {
            notebook: None,
            current_page: None,
            tools: vec![PenTool::default()],
            current_tool: 0,
            message: None,
            enabled: true,
            available_area: None,
            scheduler: RedrawScheduler::default(),
            listeners: Listeners::new(),
        };
        area.set_message(Some(MSG_NO_NOTEBOOK.to_string()));
        area
    }

    pub fn listeners(&self) -> &Listeners<EditorEvent> {
        &self.listeners
    }

    pub fn notebook(&self) -> Option<&Notebook> {
        self.notebook.as_ref()
    }

    pub fn notebook_mut(&mut self) -> Option<&mut Notebook> {
        self.notebook.as_mut()
    }

    pub fn current_page_index(&self) -> Option<usize> {
        self.current_page
    }

    pub fn current_page(&self) -> Option<&Page> {
        let index = self.current_page?;
        self.notebook.as_ref()?.page(index)
    }

    pub fn current_page_mut(&mut self) -> Option<&mut Page> {
        let index = self.current_page?;
        self.notebook.as_mut()?.page_mut(index)
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Attaches (or detaches) the notebook this view edits.
    ///
    /// The first page becomes current; an empty notebook shows
    /// [`MSG_EMPTY_NOTEBOOK`] and no notebook shows [`MSG_NO_NOTEBOOK`].
    pub fn set_notebook(&mut self, notebook: Option<Notebook>) {
        self.notebook = notebook;
        let first_page = match &self.notebook {
            Some(notebook) if notebook.page_count() > 0 => Some(0),
            _ => None,
        };
        self.set_current_page(first_page);
        self.listeners.emit(&EditorEvent::NotebookChanged);
        self.delay_redraw();
    }

    /// Selects which page pointer input and redraws target.
    ///
    /// An in-progress stroke on the old page is discarded, never carried
    /// across pages.
    pub fn set_current_page(&mut self, index: Option<usize>) {
        self.tools[self.current_tool].cancel();
        let index = index.filter(|&index| {
            self.notebook
                .as_ref()
                .is_some_and(|notebook| index < notebook.page_count())
        });
        self.current_page = index;
        let message = match (&self.notebook, index) {
            (None, _) => Some(MSG_NO_NOTEBOOK.to_string()),
            (Some(_), Some(_)) => None,
            (Some(_), None) => Some(MSG_EMPTY_NOTEBOOK.to_string()),
        };
        self.set_message(message);
        self.listeners
            .emit(&EditorEvent::CurrentPageChanged { page: index });
        self.delay_redraw();
    }

    /// Appends a page to the notebook; it becomes current when nothing was.
    pub fn add_page(&mut self, page: Page) -> Option<usize> {
        let index = self.notebook.as_mut()?.add_page(page);
        if self.current_page.is_none() {
            self.set_current_page(Some(index));
        } else {
            self.delay_redraw();
        }
        Some(index)
    }

    /// Removes a page. When the current page goes away, selection falls
    /// back to the nearest remaining index.
    pub fn remove_page(&mut self, index: usize) -> Option<Page> {
        let page = self.notebook.as_mut()?.remove_page(index)?;
        let remaining = self.notebook.as_ref().map_or(0, Notebook::page_count);
        let next = match self.current_page {
            _ if remaining == 0 => None,
            // Selection follows the same page when a predecessor is removed.
            Some(current) if current > index => Some(current - 1),
            Some(current) => Some(current.min(remaining - 1)),
            None => None,
        };
        self.set_current_page(next);
        Some(page)
    }

    /// Sets or clears the status message. Input is enabled exactly when no
    /// message shows.
    pub fn set_message(&mut self, message: Option<String>) {
        let enabled = message.is_none();
        self.message = message;
        if enabled != self.enabled {
            self.enabled = enabled;
            for tool in &mut self.tools {
                tool.set_enabled(enabled);
            }
            self.listeners.emit(&EditorEvent::EnabledChanged { enabled });
        }
        self.delay_redraw();
    }

    pub fn tool_count(&self) -> usize {
        self.tools.len()
    }

    pub fn current_tool_index(&self) -> usize {
        self.current_tool
    }

    pub fn current_tool(&self) -> &PenTool {
        &self.tools[self.current_tool]
    }

    /// Adds another configured tool and returns its index.
    pub fn add_tool(&mut self, tool: PenTool) -> usize {
        self.tools.push(tool);
        self.tools.len() - 1
    }

    /// Switches the active tool, discarding any in-progress stroke.
    pub fn switch_tool(&mut self, index: usize) -> bool {
        if index >= self.tools.len() || index == self.current_tool {
            return false;
        }
        self.tools[self.current_tool].cancel();
        self.listeners.emit(&EditorEvent::ToolDeactivate);
        self.current_tool = index;
        self.listeners.emit(&EditorEvent::ToolChange { index });
        self.listeners.emit(&EditorEvent::ToolActivate);
        self.delay_redraw();
        true
    }

    /// Reconfigures the active tool's pen.
    pub fn set_pen(&mut self, pen: Pen) {
        let drawing = self.tools[self.current_tool].is_drawing();
        self.tools[self.current_tool].set_pen(pen);
        if drawing {
            self.delay_redraw();
        }
    }

    pub fn pen(&self) -> &Pen {
        self.tools[self.current_tool].pen()
    }

    /// Routes one pointer event to the active tool.
    ///
    /// Returns `true` when the event finished a stroke and it was committed
    /// to the current page.
    pub fn pointer_event(&mut self, event: PointerEvent, surface: &mut dyn Surface) -> bool {
        if !self.enabled {
            return false;
        }
        let Some(finished) = self.tools[self.current_tool].handle(event, surface) else {
            return false;
        };
        self.listeners.emit(&EditorEvent::ToolFinish);
        self.commit_stroke(finished)
    }

    fn commit_stroke(&mut self, finished: FinishedStroke) -> bool {
        let Some(index) = self.current_page else {
            return false;
        };
        let Some(page) = self
            .notebook
            .as_mut()
            .and_then(|notebook| notebook.page_mut(index))
        else {
            return false;
        };
        if page.layer_count() == 0 {
            page.add_layer(Layer::new("default"));
        }
        let points = finished.points.len() / 2;
        let stroke = Stroke::with_points(finished.color, finished.width, finished.points);
        if let Some(layer) = page.layer_mut(0) {
            layer.add_item(Box::new(stroke));
        }
        info!("event=stroke_commit module=editor status=ok page={index} points={points}");
        true
    }

    /// Reports the area the host can give the view. Autosizing pages track
    /// it, clamped to their minimum size.
    pub fn on_surface_resize(&mut self, available: (u32, u32)) {
        self.available_area = Some(available);
        let resized = match self.current_page_mut() {
            Some(page) if page.options().autosize => {
                page.update_size(available);
                true
            }
            _ => false,
        };
        if resized {
            self.delay_redraw();
        }
    }

    /// Requests a debounced full repaint. Bursts coalesce into one.
    pub fn delay_redraw(&mut self) {
        self.scheduler.schedule(Instant::now());
    }

    pub fn redraw_pending(&self) -> bool {
        self.scheduler.is_pending()
    }

    /// Fires the pending repaint when its deadline has passed.
    pub fn tick(&mut self, surface: &mut dyn Surface, now: Instant) -> bool {
        if self.scheduler.poll(now) {
            self.redraw(surface);
            true
        } else {
            false
        }
    }

    /// Immediate full repaint: background, content, then the in-progress
    /// stroke overlay. Cancels any pending debounced repaint.
    pub fn redraw(&mut self, surface: &mut dyn Surface) {
        self.scheduler.cancel();
        match self.current_page() {
            Some(page) => {
                let (width, height) = page.size();
                surface.set_size(width, height);
                surface.clear();
                page.draw(surface);
                self.tools[self.current_tool].draw_overlay(surface);
            }
            None => {
                let message = self.message.as_deref().unwrap_or("");
                let (width, height) = message_extent(message, self.available_area);
                surface.set_size(width, height);
                surface.clear();
                surface.fill_text(message, width as f64 / 2.0, height as f64 / 2.0);
            }
        }
    }
}

impl Default for EditorArea {
    fn default() -> Self {
        Self::new()
    }
}

/// Rough text extent for sizing the message view when no page shows. The
/// host area wins when it is larger.
fn message_extent(message: &str, available: Option<(u32, u32)>) -> (u32, u32) {
    let text = (message.chars().count() as u32 * 10, 24);
    match available {
        Some((width, height)) => (width.max(text.0), height.max(text.1)),
        None => text,
    }
}
