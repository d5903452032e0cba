use crate::{entities::users, error::ServiceError};
use chrono::Utc;
use log::info;
use models::identity::Identity;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, TransactionTrait,
};
use uuid::Uuid;

/// Account details submitted at registration
#[derive(Clone, Debug, PartialEq)]
pub struct NewUser {
    pub subject: String,
    pub email: String,
    pub name: String,
    pub is_admin: bool,
}

pub struct UserService;

impl UserService {
    /// Registers the identity provider subject as a local user
    ///
    /// Email addresses are compared case-insensitively and stored lowercase.
    pub async fn register(
        db: &DatabaseConnection,
        new_user: NewUser,
    ) -> Result<users::Model, ServiceError> {
        let subject = new_user.subject.trim().to_string();
        let email = new_user.email.trim().to_lowercase();
        let name = new_user.name.trim().to_string();

        if subject.is_empty() || email.is_empty() || name.is_empty() {
            return Err(ServiceError::InvalidInput(
                "email and name are required".to_string(),
            ));
        }

        let txn = db.begin().await?;

        if users::Entity::find()
            .filter(users::Column::Subject.eq(subject.as_str()))
            .one(&txn)
            .await?
            .is_some()
        {
            return Err(ServiceError::Conflict(
                "an account is already registered for this identity".to_string(),
            ));
        }

        if users::Entity::find()
            .filter(users::Column::Email.eq(email.as_str()))
            .one(&txn)
            .await?
            .is_some()
        {
            return Err(ServiceError::Conflict(format!(
                "a user with email {email} already exists"
            )));
        }

        let user = users::ActiveModel {
            id: Set(Uuid::new_v4()),
            subject: Set(subject),
            email: Set(email),
            name: Set(name),
            is_admin: Set(new_user.is_admin),
            created_at: Set(Utc::now().naive_utc()),
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        info!(
            "Registered user {} ({}){}",
            user.id,
            user.email,
            if user.is_admin { " as admin" } else { "" }
        );
        Ok(user)
    }

    pub async fn find_by_subject(
        db: &DatabaseConnection,
        subject: &str,
    ) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find()
            .filter(users::Column::Subject.eq(subject))
            .one(db)
            .await
    }

    pub async fn find_by_email(
        db: &DatabaseConnection,
        email: &str,
    ) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find()
            .filter(users::Column::Email.eq(email.trim().to_lowercase()))
            .one(db)
            .await
    }

    /// Resolves a subject to the identity passed into service calls
    pub async fn identity_for_subject(
        db: &DatabaseConnection,
        subject: &str,
    ) -> Result<Option<Identity>, DbErr> {
        Ok(Self::find_by_subject(db, subject)
            .await?
            .map(|user| Self::identity(&user)))
    }

    pub fn identity(user: &users::Model) -> Identity {
        Identity {
            user_id: user.id,
            is_admin: user.is_admin,
        }
    }
}
