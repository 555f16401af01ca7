//! User repository: the profile join the generator reads as context.

use fit_core::entities::UserContext;

use crate::FitDb;
use crate::error::DatabaseError;
use crate::helpers::get_opt_string;

/// Profile columns written by [`FitDb::upsert_profile`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileFields {
    pub goal: Option<String>,
    pub experience_level: Option<String>,
    pub lifestyle: Option<String>,
    pub gender: Option<String>,
}

fn row_to_context(row: &libsql::Row) -> Result<UserContext, DatabaseError> {
    Ok(UserContext {
        user_id: row.get(0)?,
        name: row.get(1)?,
        goal: get_opt_string(row, 2)?,
        experience_level: get_opt_string(row, 3)?,
        lifestyle: get_opt_string(row, 4)?,
        gender: get_opt_string(row, 5)?,
    })
}

impl FitDb {
    pub async fn create_user(&self, name: &str) -> Result<i64, DatabaseError> {
        self.conn()
            .execute("INSERT INTO users (name) VALUES (?1)", [name])
            .await?;
        Ok(self.conn().last_insert_rowid())
    }

    pub async fn upsert_profile(
        &self,
        user_id: i64,
        profile: &ProfileFields,
    ) -> Result<(), DatabaseError> {
        self.conn()
            .execute(
                "INSERT INTO user_profiles (user_id, goal, experience_level, lifestyle, gender)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 ON CONFLICT(user_id) DO UPDATE SET
                     goal = excluded.goal,
                     experience_level = excluded.experience_level,
                     lifestyle = excluded.lifestyle,
                     gender = excluded.gender,
                     updated_at = datetime('now')",
                libsql::params![
                    user_id,
                    profile.goal.as_deref(),
                    profile.experience_level.as_deref(),
                    profile.lifestyle.as_deref(),
                    profile.gender.as_deref()
                ],
            )
            .await?;
        Ok(())
    }

    /// Load a user joined with their profile. A user without a profile row
    /// yields a context with every profile field `None`.
    pub async fn find_user_context(
        &self,
        user_id: i64,
    ) -> Result<Option<UserContext>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                "SELECT u.id, u.name, p.goal, p.experience_level, p.lifestyle, p.gender
                 FROM users u
                 LEFT JOIN user_profiles p ON p.user_id = u.id
                 WHERE u.id = ?1",
                [user_id],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_context(&row)?)),
            None => Ok(None),
        }
    }
}
