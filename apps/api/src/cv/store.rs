//! CV reducer and store.
//!
//! `reduce` is pure: it takes the current document and one `CvAction` and
//! returns the next document, never mutating its input. Every action is
//! total; an update or removal naming an unknown id returns an unchanged copy.
//!
//! `CvStore` owns the current document and allocates entry ids before
//! handing `Add*` and `LoadExtracted` actions to the reducer.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::debug;

use crate::cv::model::{
    CustomSection, CvData, EducationEntry, EntryId, ExperienceEntry, ExtractedCv,
    VolunteeringEntry,
};

/// Copies every `Some` field of a patch onto the target.
macro_rules! apply_patch {
    ($target:expr, $patch:expr, [$($field:ident),* $(,)?]) => {
        $(
            if let Some(value) = $patch.$field {
                $target.$field = value;
            }
        )*
    };
}

// ────────────────────────────────────────────────────────────────────────────
// Patches
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HeaderPatch {
    pub full_name: Option<String>,
    pub title: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub linkedin: Option<String>,
    pub website: Option<String>,
    pub summary: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExperiencePatch {
    pub position: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub current: Option<bool>,
    pub description: Option<String>,
    pub achievements: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EducationPatch {
    pub institution: Option<String>,
    pub degree: Option<String>,
    pub field: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub grade: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VolunteeringPatch {
    pub organization: Option<String>,
    pub role: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomSectionPatch {
    pub title: Option<String>,
    pub items: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillsPatch {
    pub technical: Option<Vec<String>>,
    pub soft: Option<Vec<String>>,
}

// ────────────────────────────────────────────────────────────────────────────
// Actions
// ────────────────────────────────────────────────────────────────────────────

/// One editor operation. Serialized as `{"type": "addExperience", ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CvAction {
    UpdateHeader { changes: HeaderPatch },

    AddExperience { entry: ExperienceEntry },
    UpdateExperience { id: EntryId, changes: ExperiencePatch },
    RemoveExperience { id: EntryId },

    AddEducation { entry: EducationEntry },
    UpdateEducation { id: EntryId, changes: EducationPatch },
    RemoveEducation { id: EntryId },

    AddVolunteering { entry: VolunteeringEntry },
    UpdateVolunteering { id: EntryId, changes: VolunteeringPatch },
    RemoveVolunteering { id: EntryId },

    AddCustomSection { entry: CustomSection },
    UpdateCustomSection { id: EntryId, changes: CustomSectionPatch },
    RemoveCustomSection { id: EntryId },

    UpdateSkills { changes: SkillsPatch },
    UpdateProgrammingLanguages { languages: Vec<String> },
    UpdateSoftwareTools { tools: Vec<String> },
    UpdateProfileSummary { text: String },

    LoadExtracted { data: ExtractedCv },
    Reset,
}

/// Applies `f` to the entry with `id`, if any. Returns a new vector.
fn update_where<T: Clone>(
    items: &[T],
    id: EntryId,
    id_of: impl Fn(&T) -> EntryId,
    f: impl FnOnce(&mut T),
) -> Vec<T> {
    let mut items = items.to_vec();
    if let Some(item) = items.iter_mut().find(|item| id_of(item) == id) {
        f(item);
    }
    items
}

fn remove_where<T: Clone>(items: &[T], id: EntryId, id_of: impl Fn(&T) -> EntryId) -> Vec<T> {
    items.iter().filter(|item| id_of(item) != id).cloned().collect()
}

fn appended<T: Clone>(items: &[T], entry: T) -> Vec<T> {
    let mut items = items.to_vec();
    items.push(entry);
    items
}

/// Pure reducer: returns the document that results from applying `action` to `state`.
pub fn reduce(state: &CvData, action: CvAction) -> CvData {
    let mut next = state.clone();
    match action {
        CvAction::UpdateHeader { changes } => {
            apply_patch!(
                next.header,
                changes,
                [full_name, title, email, phone, location, linkedin, website, summary]
            );
        }

        CvAction::AddExperience { entry } => {
            next.experience = appended(&state.experience, entry);
        }
        CvAction::UpdateExperience { id, changes } => {
            next.experience = update_where(&state.experience, id, |e| e.id, |e| {
                apply_patch!(
                    e,
                    changes,
                    [position, company, location, start_date, end_date, current, description, achievements]
                );
            });
        }
        CvAction::RemoveExperience { id } => {
            next.experience = remove_where(&state.experience, id, |e| e.id);
        }

        CvAction::AddEducation { entry } => {
            next.education = appended(&state.education, entry);
        }
        CvAction::UpdateEducation { id, changes } => {
            next.education = update_where(&state.education, id, |e| e.id, |e| {
                apply_patch!(
                    e,
                    changes,
                    [institution, degree, field, start_date, end_date, grade, description]
                );
            });
        }
        CvAction::RemoveEducation { id } => {
            next.education = remove_where(&state.education, id, |e| e.id);
        }

        CvAction::AddVolunteering { entry } => {
            next.volunteering = appended(&state.volunteering, entry);
        }
        CvAction::UpdateVolunteering { id, changes } => {
            next.volunteering = update_where(&state.volunteering, id, |e| e.id, |e| {
                apply_patch!(e, changes, [organization, role, start_date, end_date, description]);
            });
        }
        CvAction::RemoveVolunteering { id } => {
            next.volunteering = remove_where(&state.volunteering, id, |e| e.id);
        }

        CvAction::AddCustomSection { entry } => {
            next.custom_sections = appended(&state.custom_sections, entry);
        }
        CvAction::UpdateCustomSection { id, changes } => {
            next.custom_sections = update_where(&state.custom_sections, id, |s| s.id, |s| {
                apply_patch!(s, changes, [title, items]);
            });
        }
        CvAction::RemoveCustomSection { id } => {
            next.custom_sections = remove_where(&state.custom_sections, id, |s| s.id);
        }

        CvAction::UpdateSkills { changes } => {
            apply_patch!(next.skills, changes, [technical, soft]);
        }
        CvAction::UpdateProgrammingLanguages { languages } => {
            next.programming_languages = languages;
        }
        CvAction::UpdateSoftwareTools { tools } => {
            next.software_tools = tools;
        }
        CvAction::UpdateProfileSummary { text } => {
            next.profile_summary = text;
        }

        CvAction::LoadExtracted { data } => {
            // Shallow: present top-level fields replace, absent ones stay.
            apply_patch!(
                next,
                data,
                [
                    header,
                    experience,
                    education,
                    skills,
                    programming_languages,
                    software_tools,
                    volunteering,
                    profile_summary,
                    custom_sections,
                ]
            );
        }
        CvAction::Reset => {
            next = CvData::default();
        }
    }
    next
}

// ────────────────────────────────────────────────────────────────────────────
// Store
// ────────────────────────────────────────────────────────────────────────────

/// Current document plus id allocation for one editing session.
#[derive(Debug, Clone, Default)]
pub struct CvStore {
    state: CvData,
    last_id: EntryId,
}

impl CvStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &CvData {
        &self.state
    }

    /// Timestamp-based id, bumped past the previous one when two entries
    /// land in the same millisecond.
    fn next_id(&mut self) -> EntryId {
        let now = chrono::Utc::now().timestamp_millis();
        self.last_id = now.max(self.last_id + 1);
        self.last_id
    }

    fn assign_id(&mut self, id: &mut EntryId) {
        if *id == 0 {
            *id = self.next_id();
        }
    }

    /// Applies one action and returns the new document.
    pub fn dispatch(&mut self, mut action: CvAction) -> &CvData {
        match &mut action {
            CvAction::AddExperience { entry } => entry.id = self.next_id(),
            CvAction::AddEducation { entry } => entry.id = self.next_id(),
            CvAction::AddVolunteering { entry } => entry.id = self.next_id(),
            CvAction::AddCustomSection { entry } => entry.id = self.next_id(),
            CvAction::LoadExtracted { data } => {
                for e in data.experience.iter_mut().flatten() {
                    self.assign_id(&mut e.id);
                }
                for e in data.education.iter_mut().flatten() {
                    self.assign_id(&mut e.id);
                }
                for e in data.volunteering.iter_mut().flatten() {
                    self.assign_id(&mut e.id);
                }
                for s in data.custom_sections.iter_mut().flatten() {
                    self.assign_id(&mut s.id);
                }
            }
            _ => {}
        }
        self.state = reduce(&self.state, action);
        &self.state
    }
}

/// Users kept in memory at once. Writing for a new user beyond this evicts
/// the store that was written least recently.
pub const MAX_USERS: usize = 1024;

struct Slot {
    store: CvStore,
    touched: u64,
}

#[derive(Default)]
struct Slots {
    by_user: HashMap<String, Slot>,
    clock: u64,
}

/// Per-user CV stores, created empty on first write. In memory only and
/// bounded by `MAX_USERS`.
#[derive(Clone)]
pub struct CvWorkspace {
    slots: Arc<RwLock<Slots>>,
    capacity: usize,
}

impl Default for CvWorkspace {
    fn default() -> Self {
        Self::with_capacity(MAX_USERS)
    }
}

impl CvWorkspace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Arc::default(),
            capacity: capacity.max(1),
        }
    }

    /// Snapshot of the user's current document.
    pub async fn snapshot(&self, user_id: &str) -> CvData {
        self.slots
            .read()
            .await
            .by_user
            .get(user_id)
            .map(|slot| slot.store.state().clone())
            .unwrap_or_default()
    }

    /// Dispatches an action against the user's store and returns the new document.
    pub async fn dispatch(&self, user_id: &str, action: CvAction) -> CvData {
        let mut slots = self.slots.write().await;
        slots.clock += 1;
        let clock = slots.clock;

        if !slots.by_user.contains_key(user_id) && slots.by_user.len() >= self.capacity {
            let oldest = slots
                .by_user
                .iter()
                .min_by_key(|(_, slot)| slot.touched)
                .map(|(user, _)| user.clone());
            if let Some(user) = oldest {
                slots.by_user.remove(&user);
                debug!("Evicted CV store for user {} ({} stores held)", user, self.capacity);
            }
        }

        let slot = slots
            .by_user
            .entry(user_id.to_string())
            .or_insert_with(|| Slot {
                store: CvStore::new(),
                touched: clock,
            });
        slot.touched = clock;
        slot.store.dispatch(action).clone()
    }
}
