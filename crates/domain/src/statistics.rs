use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::{
    DeviceID, ExerciseID, Gym, GymID, Name, TenantID, TrainingEntry, UserID, WeightStackCount,
};

/// Training history of one user on one exercise.
#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseSummary {
    pub key: String,
    pub gym_id: GymID,
    pub gym_name: Name,
    pub device_id: DeviceID,
    pub device_name: Name,
    pub exercise_id: ExerciseID,
    pub exercise_name: Name,
    pub tenant_id: TenantID,
    pub entries: Vec<TrainingEntry>,
    pub last_performed_at: DateTime<Utc>,
    pub weight_stack_count: WeightStackCount,
    pub personal_best_entry: Option<TrainingEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GymActivity {
    pub last_performed_at: DateTime<Utc>,
}

#[must_use]
pub fn create_exercise_key(
    gym_id: &GymID,
    device_id: &DeviceID,
    exercise_id: &ExerciseID,
) -> String {
    format!("{gym_id}::{device_id}::{exercise_id}")
}

/// Summarize every exercise on which the user has recorded sets, most recently performed first.
///
/// Only entries logged under the tenant of the exercise's device are considered.
#[must_use]
pub fn collect_user_exercise_summaries(gyms: &[Gym], user_id: &UserID) -> Vec<ExerciseSummary> {
    let mut summaries = gyms
        .iter()
        .flat_map(|gym| gym.devices.iter().map(move |device| (gym, device)))
        .flat_map(|(gym, device)| {
            device
                .exercises
                .iter()
                .map(move |exercise| (gym, device, exercise))
        })
        .filter_map(|(gym, device, exercise)| {
            let entries = exercise.entries(&device.tenant_id, user_id);
            let last_performed_at = entries.iter().map(|e| e.performed_at).max()?;
            Some(ExerciseSummary {
                key: create_exercise_key(&gym.id, &device.id, &exercise.id),
                gym_id: gym.id.clone(),
                gym_name: gym.name.clone(),
                device_id: device.id.clone(),
                device_name: device.name.clone(),
                exercise_id: exercise.id.clone(),
                exercise_name: exercise.name.clone(),
                tenant_id: device.tenant_id.clone(),
                entries: entries.to_vec(),
                last_performed_at,
                weight_stack_count: device.weight_stack_count,
                personal_best_entry: personal_best_entry(entries).cloned(),
            })
        })
        .collect::<Vec<_>>();

    summaries.sort_by(|a, b| b.last_performed_at.cmp(&a.last_performed_at));

    summaries
}

/// The entry with the highest total load. On ties the earliest entry in the list wins. Entries
/// without any usable load are never selected.
#[must_use]
pub fn personal_best_entry(entries: &[TrainingEntry]) -> Option<&TrainingEntry> {
    entries
        .iter()
        .filter_map(|entry| Some((entry, entry.total_load()?)))
        .fold(None::<(&TrainingEntry, f64)>, |best, (entry, total)| match best {
            Some((_, best_total)) if total <= best_total => best,
            _ => Some((entry, total)),
        })
        .map(|(entry, _)| entry)
}

/// Most recent activity per gym.
#[must_use]
pub fn derive_gym_activity(summaries: &[ExerciseSummary]) -> BTreeMap<GymID, GymActivity> {
    let mut activity: BTreeMap<GymID, GymActivity> = BTreeMap::new();

    for summary in summaries {
        activity
            .entry(summary.gym_id.clone())
            .and_modify(|a| {
                a.last_performed_at = a.last_performed_at.max(summary.last_performed_at);
            })
            .or_insert(GymActivity {
                last_performed_at: summary.last_performed_at,
            });
    }

    activity
}

/// Order gyms for display: gyms with activity first, most recent first, all others after them.
/// Gyms with equal activity keep their original order.
#[must_use]
pub fn sort_gyms_by_activity<'a>(
    gyms: &'a [Gym],
    activity: &BTreeMap<GymID, GymActivity>,
) -> Vec<&'a Gym> {
    let mut sorted = gyms.iter().collect::<Vec<_>>();
    let last_performed_at = |gym: &Gym| activity.get(&gym.id).map(|a| a.last_performed_at);

    sorted.sort_by(|a, b| match (last_performed_at(a), last_performed_at(b)) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });

    sorted
}
