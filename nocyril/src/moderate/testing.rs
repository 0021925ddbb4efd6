//! In-memory [`PlatformApi`] fake shared by the crate's tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::vk::{ApiError, GroupRecord, PlatformApi, UserRecord};

#[derive(Default)]
pub struct FakeApi {
    users: HashMap<i64, UserRecord>,
    groups: HashMap<i64, GroupRecord>,
    fail_lookups: bool,
    fail_deletes: bool,
    user_calls: Mutex<Vec<i64>>,
    group_calls: Mutex<Vec<i64>>,
    deletions: Mutex<Vec<(i64, i64)>>,
}

impl FakeApi {
    pub fn with_user(self, id: i64, first_name: &str) -> Self {
        self.with_user_record(id, id, first_name)
    }

    /// Answer lookups for `requested` with a record carrying `returned`.
    pub fn with_user_record(mut self, requested: i64, returned: i64, first_name: &str) -> Self {
        self.users.insert(
            requested,
            UserRecord {
                id: returned,
                first_name: first_name.to_string(),
                last_name: String::new(),
            },
        );
        self
    }

    pub fn with_group(mut self, id: i64, name: &str) -> Self {
        self.groups.insert(
            id,
            GroupRecord {
                id,
                name: name.to_string(),
                screen_name: String::new(),
            },
        );
        self
    }

    pub fn failing_lookups(mut self) -> Self {
        self.fail_lookups = true;
        self
    }

    pub fn failing_deletes(mut self) -> Self {
        self.fail_deletes = true;
        self
    }

    pub fn user_calls(&self) -> Vec<i64> {
        self.user_calls.lock().unwrap().clone()
    }

    pub fn group_calls(&self) -> Vec<i64> {
        self.group_calls.lock().unwrap().clone()
    }

    pub fn deletions(&self) -> Vec<(i64, i64)> {
        self.deletions.lock().unwrap().clone()
    }

    /// Poll until at least `count` deletions were requested, or give up.
    pub async fn wait_for_deletions(&self, count: usize) -> Vec<(i64, i64)> {
        let _ = tokio::time::timeout(Duration::from_secs(2), async {
            while self.deletions.lock().unwrap().len() < count {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await;
        self.deletions()
    }

    /// Poll until at least `count` user lookups happened, or give up.
    pub async fn wait_for_user_calls(&self, count: usize) -> Vec<i64> {
        let _ = tokio::time::timeout(Duration::from_secs(2), async {
            while self.user_calls.lock().unwrap().len() < count {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await;
        self.user_calls()
    }
}

#[async_trait]
impl PlatformApi for FakeApi {
    async fn users_get(&self, user_id: i64) -> Result<Vec<UserRecord>, ApiError> {
        self.user_calls.lock().unwrap().push(user_id);
        if self.fail_lookups {
            return Err(ApiError::Status(500));
        }
        Ok(self.users.get(&user_id).cloned().into_iter().collect())
    }

    async fn groups_get_by_id(&self, group_id: i64) -> Result<Vec<GroupRecord>, ApiError> {
        self.group_calls.lock().unwrap().push(group_id);
        if self.fail_lookups {
            return Err(ApiError::Status(500));
        }
        Ok(self.groups.get(&group_id).cloned().into_iter().collect())
    }

    async fn delete_comment(&self, owner_id: i64, comment_id: i64) -> Result<bool, ApiError> {
        self.deletions.lock().unwrap().push((owner_id, comment_id));
        if self.fail_deletes {
            return Err(ApiError::Api {
                code: 15,
                message: "Access denied".to_string(),
            });
        }
        Ok(true)
    }
}
