use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use common::models::{
    ApplicationAward, Award, AwardRound, JournalistProfile, JudgeScore, Project,
};
use common::role::Role;
use common::status::ApplicationStatus;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::error::FakeError;

pub const PASSWORD: &str = "password";

#[derive(Debug, Clone)]
pub struct User {
    pub uuid: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    pub first_name: String,
}

/// Everything the fake backend stores.
#[derive(Debug, Default)]
pub struct Data {
    pub users: Vec<User>,
    pub awards: Vec<Award>,
    /// Award join records keyed by collection (`award-categories`, ...).
    pub award_parts: HashMap<&'static str, Vec<Value>>,
    pub applications: Vec<ApplicationAward>,
    pub scores: Vec<JudgeScore>,
    pub journalist: JournalistProfile,
    pub projects: Vec<Project>,
    /// Reference records keyed by collection (`categories`, `regions`, ...).
    pub reference: HashMap<&'static str, Vec<Value>>,
}

impl Data {
    /// One user per role plus a little reference data.
    pub fn seeded() -> Self {
        let users = [
            ("user-super", "super@example.org", Role::SuperAdmin, "Sade"),
            ("user-admin", "admin@example.org", Role::Admin, "Amara"),
            ("user-judge", "judge@example.org", Role::Judge, "Juma"),
            ("user-journalist", "journalist@example.org", Role::Journalist, "Wanjiru"),
        ]
        .into_iter()
        .map(|(uuid, email, role, first_name)| User {
            uuid: uuid.into(),
            email: email.into(),
            password: PASSWORD.into(),
            role,
            first_name: first_name.into(),
        })
        .collect();

        let mut reference = HashMap::new();
        reference.insert(
            "categories",
            vec![json!({"uuid": "cat-investigative", "name": "Investigative"})],
        );
        reference.insert(
            "criterias",
            vec![
                json!({"uuid": "crit-accuracy", "name": "Accuracy"}),
                json!({"uuid": "crit-impact", "name": "Impact"}),
            ],
        );
        reference.insert(
            "regions",
            vec![json!({"uuid": "reg-coast", "name": "Coast", "code": "CST"})],
        );
        reference.insert(
            "media-channels",
            vec![json!({"uuid": "mc-radio", "name": "Radio Maisha", "mediaType": "radio"})],
        );
        reference.insert(
            "judges",
            vec![json!({
                "uuid": "judge-1",
                "firstName": "Juma",
                "lastName": "Baraka",
                "email": "judge@example.org"
            })],
        );

        Self {
            users,
            reference,
            journalist: JournalistProfile {
                uuid: "user-journalist".into(),
                email: "journalist@example.org".into(),
                current_stage: Some(1),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    pub fn user(&self, role: Role) -> Option<&User> {
        self.users.iter().find(|u| u.role == role)
    }

    /// Add an award with rounds `(uuid, number, is_final)`; no round is current.
    pub fn add_award(&mut self, uuid: &str, title: &str, rounds: &[(&str, u32, bool)]) {
        let rounds = rounds
            .iter()
            .map(|(round_uuid, number, is_final)| AwardRound {
                uuid: (*round_uuid).into(),
                award_uuid: Some(uuid.into()),
                number: *number,
                name: format!("Round {number}"),
                minimum_score: 0.0,
                is_final: *is_final,
                is_current: false,
            })
            .collect();
        self.awards.push(Award {
            uuid: uuid.into(),
            title: title.into(),
            description: None,
            start_date: None,
            end_date: None,
            judge_start_date: None,
            judge_end_date: None,
            is_published: false,
            is_active: true,
            published_at: None,
            rounds,
        });
    }

    /// Mark one round current, clearing the flag on the others.
    pub fn set_current_round(&mut self, award_uuid: &str, round_uuid: Option<&str>) {
        if let Some(award) = self.awards.iter_mut().find(|a| a.uuid == award_uuid) {
            for round in &mut award.rounds {
                round.is_current = Some(round.uuid.as_str()) == round_uuid;
            }
        }
    }

    pub fn add_application(
        &mut self,
        uuid: &str,
        award_uuid: &str,
        round_uuid: Option<&str>,
        status: ApplicationStatus,
    ) {
        self.applications.push(ApplicationAward {
            uuid: uuid.into(),
            award_uuid: award_uuid.into(),
            category_uuid: Some("cat-investigative".into()),
            media_channel_uuid: None,
            title: format!("Story {uuid}"),
            description: None,
            is_group_application: false,
            status,
            current_stage: Some(5),
            round_uuid: round_uuid.map(Into::into),
            story_link: None,
            publication_date: None,
            applicant_name: Some("Wanjiru Otieno".into()),
            is_submitted: true,
            members: Vec::new(),
            attachments: Vec::new(),
            scores: Vec::new(),
            total_score: None,
        });
    }

    pub fn award_mut(&mut self, uuid: &str) -> Result<&mut Award, FakeError> {
        self.awards
            .iter_mut()
            .find(|a| a.uuid == uuid)
            .ok_or_else(|| FakeError::NotFound(format!("Award {uuid} not found")))
    }

    pub fn application_mut(&mut self, uuid: &str) -> Result<&mut ApplicationAward, FakeError> {
        self.applications
            .iter_mut()
            .find(|a| a.uuid == uuid)
            .ok_or_else(|| FakeError::NotFound(format!("Application {uuid} not found")))
    }

    pub fn project_mut(&mut self, uuid: &str) -> Result<&mut Project, FakeError> {
        self.projects
            .iter_mut()
            .find(|p| p.uuid == uuid)
            .ok_or_else(|| FakeError::NotFound(format!("Project {uuid} not found")))
    }

    /// An application with the scores recorded against it attached.
    pub fn application_view(&self, app: &ApplicationAward) -> ApplicationAward {
        let mut app = app.clone();
        app.scores = self
            .scores
            .iter()
            .filter(|s| s.application_uuid == app.uuid)
            .cloned()
            .collect();
        app
    }
}

#[derive(Default)]
struct Shared {
    data: Mutex<Data>,
    hits: Mutex<HashMap<String, u32>>,
    delay: Mutex<Duration>,
    failures: Mutex<HashMap<String, (u16, String)>>,
}

#[derive(Clone, Default)]
pub struct AppState {
    shared: Arc<Shared>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl AppState {
    pub fn new(data: Data) -> Self {
        Self {
            shared: Arc::new(Shared {
                data: Mutex::new(data),
                ..Default::default()
            }),
        }
    }

    pub fn data(&self) -> MutexGuard<'_, Data> {
        lock(&self.shared.data)
    }

    pub fn record_hit(&self, key: &str) {
        *lock(&self.shared.hits).entry(key.to_string()).or_default() += 1;
    }

    pub fn hits(&self, key: &str) -> u32 {
        lock(&self.shared.hits).get(key).copied().unwrap_or(0)
    }

    pub fn total_hits(&self) -> u32 {
        lock(&self.shared.hits).values().sum()
    }

    pub fn delay(&self) -> Duration {
        *lock(&self.shared.delay)
    }

    pub fn set_delay(&self, delay: Duration) {
        *lock(&self.shared.delay) = delay;
    }

    pub fn fail_next(&self, key: &str, status: u16, message: &str) {
        lock(&self.shared.failures).insert(key.to_string(), (status, message.to_string()));
    }

    pub fn take_failure(&self, key: &str) -> Option<(u16, String)> {
        lock(&self.shared.failures).remove(key)
    }
}

pub fn new_uuid() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Overwrite a record's fields with those present in `patch`, keeping its uuid.
pub fn merge<T>(record: &T, patch: &Value) -> Result<T, FakeError>
where
    T: Serialize + DeserializeOwned,
{
    let mut value = serde_json::to_value(record).map_err(|e| FakeError::Internal(e.to_string()))?;
    if let (Some(target), Some(patch)) = (value.as_object_mut(), patch.as_object()) {
        for (key, field) in patch {
            if key != "uuid" {
                target.insert(key.clone(), field.clone());
            }
        }
    }
    Ok(serde_json::from_value(value)?)
}

/// Pull the `uuid` out of an update body.
pub fn body_uuid(body: &Value) -> Result<String, FakeError> {
    body.get("uuid")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| FakeError::Validation("uuid is required".into()))
}
