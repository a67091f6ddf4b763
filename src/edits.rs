// src/edits.rs
//! # Slot edits
//!
//! User overrides for individual timetable slots. Edits live in the cached
//! bundle under `edited_slots` and survive every background refresh: writes
//! here merge into the stored bundle instead of replacing it, and the refresh
//! path carries the map forward untouched.

use crate::model::{CachedBundle, CourseSlotMap, EditedSlot, EditedSlots};
use crate::store::{bundle_key, Store};

/// Visibility of the edit overlay. `Modify` is sticky: asking for it again
/// while already in it is a no-op, not a toggle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditMode {
    Hidden,
    Shown,
    Modify,
}

#[derive(Debug)]
pub struct EditSession {
    pub mode: EditMode,
}

impl EditSession {
    pub fn new() -> Self {
        Self {
            mode: EditMode::Hidden,
        }
    }

    /// Hide/Show button: flips between hidden and shown; leaving modify mode
    /// hides the overlay entirely.
    pub fn toggle_visible(&mut self) -> EditMode {
        self.mode = match self.mode {
            EditMode::Hidden => EditMode::Shown,
            EditMode::Shown | EditMode::Modify => EditMode::Hidden,
        };
        self.mode
    }

    pub fn enter_modify(&mut self) -> EditMode {
        self.mode = EditMode::Modify;
        self.mode
    }

    pub fn exit_modify(&mut self) -> EditMode {
        if self.mode == EditMode::Modify {
            self.mode = EditMode::Shown;
        }
        self.mode
    }
}

impl Default for EditSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Asks the user for a slot's replacement title and classroom. `None` means
/// the user cancelled; the slot stays as it was.
pub trait SlotPrompt {
    fn edit(&mut self, slot: &str, current_title: &str, current_classroom: &str)
        -> Option<EditedSlot>;
}

/// Prompt for one slot and persist the answer. Returns whether anything was
/// saved. Current values shown to the user are the existing edit if any,
/// otherwise the scraped course.
pub fn modify_slot<P: SlotPrompt>(
    store: &Store,
    user: &str,
    slot: &str,
    courses: &CourseSlotMap,
    prompt: &mut P,
) -> bool {
    let existing = current_edits(store, user);
    let (title, classroom) = match existing.get(slot) {
        Some(e) => (e.edited_title.clone(), e.edited_classroom.clone()),
        None => match courses.get(slot) {
            Some(c) => (c.title.clone(), c.classroom.clone()),
            None => (s!(), s!()),
        },
    };

    match prompt.edit(slot, &title, &classroom) {
        Some(edit) => {
            save_edit(store, user, slot, edit);
            true
        }
        None => {
            logd!("edits: {slot} edit cancelled");
            false
        }
    }
}

/// Merge one edit into the stored bundle. Only `edited_slots` changes.
pub fn save_edit(store: &Store, user: &str, slot: &str, edit: EditedSlot) {
    merge(store, user, |edits| {
        edits.insert(s!(slot), edit);
    });
    logf!("edits: saved override for {slot}");
}

/// Drop one edit; the slot falls back to its scraped course.
pub fn remove_edit(store: &Store, user: &str, slot: &str) {
    merge(store, user, |edits| {
        edits.remove(slot);
    });
    logf!("edits: removed override for {slot}");
}

pub fn current_edits(store: &Store, user: &str) -> EditedSlots {
    store
        .get::<CachedBundle>(&bundle_key(user))
        .map(|b| b.edited_slots)
        .unwrap_or_default()
}

fn merge(store: &Store, user: &str, apply: impl FnOnce(&mut EditedSlots)) {
    let key = bundle_key(user);
    let mut bundle: CachedBundle = store.get(&key).unwrap_or_default();
    apply(&mut bundle.edited_slots);
    store.set(&key, &bundle);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CourseInfo;
    use std::fs;
    use std::path::PathBuf;

    struct Scripted(Option<EditedSlot>);

    impl SlotPrompt for Scripted {
        fn edit(&mut self, _: &str, _: &str, _: &str) -> Option<EditedSlot> {
            self.0.take()
        }
    }

    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("acad_edits_{name}_{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn modify_is_sticky_and_toggle_hides() {
        let mut s = EditSession::new();
        assert_eq!(s.toggle_visible(), EditMode::Shown);
        assert_eq!(s.enter_modify(), EditMode::Modify);
        assert_eq!(s.enter_modify(), EditMode::Modify);
        assert_eq!(s.exit_modify(), EditMode::Shown);
        s.enter_modify();
        assert_eq!(s.toggle_visible(), EditMode::Hidden);
    }

    #[test]
    fn save_merges_without_touching_rest_of_bundle() {
        let store = Store::open(scratch("merge"));
        let key = bundle_key("u1");
        let mut bundle = CachedBundle::default();
        bundle.replaced_timetable_html = Some(s!("<table></table>"));
        store.set(&key, &bundle);

        save_edit(
            &store,
            "u1",
            "A1",
            EditedSlot {
                edited_title: s!("Free"),
                edited_classroom: s!("-"),
            },
        );

        let back: CachedBundle = store.get(&key).unwrap();
        assert_eq!(back.replaced_timetable_html.as_deref(), Some("<table></table>"));
        assert_eq!(back.edited_slots["A1"].edited_title, "Free");

        remove_edit(&store, "u1", "A1");
        let back: CachedBundle = store.get(&key).unwrap();
        assert!(back.edited_slots.is_empty());
    }

    #[test]
    fn cancelled_prompt_saves_nothing() {
        let store = Store::open(scratch("cancel"));
        let mut courses = CourseSlotMap::new();
        courses.insert(
            s!("A1"),
            CourseInfo {
                title: s!("Algorithms"),
                classroom: s!("TP-401"),
            },
        );
        assert!(!modify_slot(&store, "u2", "A1", &courses, &mut Scripted(None)));
        assert!(current_edits(&store, "u2").is_empty());

        let edit = EditedSlot {
            edited_title: s!("Seminar"),
            edited_classroom: s!("Hall 1"),
        };
        assert!(modify_slot(&store, "u2", "A1", &courses, &mut Scripted(Some(edit))));
        assert_eq!(current_edits(&store, "u2")["A1"].edited_title, "Seminar");
    }
}
