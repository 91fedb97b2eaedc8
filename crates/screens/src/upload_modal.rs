use serde::Serialize;

/// How the user picked the file. Both paths lead to the same upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadSource {
    DragDrop,
    Browse,
}

/// Open/closed and drag-highlight state of an upload dialog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct UploadModal {
    pub open: bool,
    /// A file is being dragged over the drop zone.
    pub drag_over: bool,
}

impl UploadModal {
    pub fn open(&mut self) {
        self.open = true;
        self.drag_over = false;
    }

    pub fn close(&mut self) {
        self.open = false;
        self.drag_over = false;
    }

    /// Highlight the drop zone. Ignored while closed.
    pub fn drag_enter(&mut self) {
        if self.open {
            self.drag_over = true;
        }
    }

    pub fn drag_leave(&mut self) {
        self.drag_over = false;
    }

    /// A file arrived, by drop or browse; the highlight always clears.
    pub fn file_chosen(&mut self) {
        self.drag_over = false;
    }
}
