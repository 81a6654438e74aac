use crate::core::models::{
    Account, AccountWithProfile, DoctorProfile, PatientProfile, Profile, Role,
};
use crate::utils::error::{ApiError, Result};
use sea_orm::*;
use std::collections::HashMap;
use tracing::debug;
use uuid::Uuid;

use super::super::entities::{self, account, appointment, doctor, patient};
use super::types::{AccountFilter, Page, SeaOrmDatabase, page_offset};

impl SeaOrmDatabase {
    /// Find account by ID, together with its profile
    pub async fn find_account_by_id(&self, account_id: Uuid) -> Result<Option<AccountWithProfile>> {
        debug!("Finding account by ID: {}", account_id);

        let model = entities::Account::find_by_id(account_id).one(&self.db).await?;
        match model {
            Some(model) => Ok(Some(self.with_profile(model.to_domain()?).await?)),
            None => Ok(None),
        }
    }

    /// Find account by email, together with its profile
    pub async fn find_account_by_email(&self, email: &str) -> Result<Option<AccountWithProfile>> {
        debug!("Finding account by email: {}", email);

        let model = entities::Account::find()
            .filter(account::Column::Email.eq(email))
            .one(&self.db)
            .await?;
        match model {
            Some(model) => Ok(Some(self.with_profile(model.to_domain()?).await?)),
            None => Ok(None),
        }
    }

    /// Whether an account already uses this email
    pub async fn email_exists(&self, email: &str) -> Result<bool> {
        let count = entities::Account::find()
            .filter(account::Column::Email.eq(email))
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }

    /// Update account password
    pub async fn update_account_password(
        &self,
        account_id: Uuid,
        password_hash: &str,
    ) -> Result<()> {
        debug!("Updating password for account: {}", account_id);

        let mut account: account::ActiveModel = entities::Account::find_by_id(account_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| ApiError::not_found("Usuário não encontrado"))?
            .into();

        account.password_hash = Set(password_hash.to_string());
        account.updated_at = Set(chrono::Utc::now().into());
        account.update(&self.db).await?;

        Ok(())
    }

    /// Activate or deactivate an account. `None` when the account does not exist.
    pub async fn set_account_active(
        &self,
        account_id: Uuid,
        active: bool,
    ) -> Result<Option<AccountWithProfile>> {
        debug!("Setting active={} for account: {}", active, account_id);

        let Some(model) = entities::Account::find_by_id(account_id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut account: account::ActiveModel = model.into();
        account.active = Set(active);
        account.updated_at = Set(chrono::Utc::now().into());
        let updated = account.update(&self.db).await?;

        Ok(Some(self.with_profile(updated.to_domain()?).await?))
    }

    /// Delete an account and its profile in one transaction. `false` when nothing was deleted.
    /// Refused while the profile has appointments.
    pub async fn delete_account(&self, account_id: Uuid) -> Result<bool> {
        debug!("Deleting account: {}", account_id);

        let txn = self.db.begin().await?;

        let doctor_ids = entities::Doctor::find()
            .select_only()
            .column(doctor::Column::Id)
            .filter(doctor::Column::AccountId.eq(account_id))
            .into_tuple::<Uuid>()
            .all(&txn)
            .await?;
        let patient_ids = entities::Patient::find()
            .select_only()
            .column(patient::Column::Id)
            .filter(patient::Column::AccountId.eq(account_id))
            .into_tuple::<Uuid>()
            .all(&txn)
            .await?;
        let linked = entities::Appointment::find()
            .filter(
                Condition::any()
                    .add(appointment::Column::DoctorId.is_in(doctor_ids))
                    .add(appointment::Column::PatientId.is_in(patient_ids)),
            )
            .count(&txn)
            .await?;
        if linked > 0 {
            txn.rollback().await?;
            return Err(ApiError::validation(
                "Não é possível deletar um usuário com consultas vinculadas",
            ));
        }

        entities::Doctor::delete_many()
            .filter(doctor::Column::AccountId.eq(account_id))
            .exec(&txn)
            .await?;
        entities::Patient::delete_many()
            .filter(patient::Column::AccountId.eq(account_id))
            .exec(&txn)
            .await?;
        let result = entities::Account::delete_by_id(account_id).exec(&txn).await?;

        txn.commit().await?;
        Ok(result.rows_affected > 0)
    }

    /// Paginated account listing, newest first. `page` is 1-based.
    pub async fn list_accounts(
        &self,
        filter: &AccountFilter,
        page: u64,
        per_page: u64,
    ) -> Result<Page<AccountWithProfile>> {
        let per_page = per_page.max(1);
        if page_offset(page, per_page).is_none() {
            return Err(ApiError::validation("Página fora do intervalo"));
        }

        let mut query = entities::Account::find();
        if let Some(role) = filter.role {
            query = query.filter(account::Column::Role.eq(role.to_string()));
        }
        if let Some(active) = filter.active {
            query = query.filter(account::Column::Active.eq(active));
        }

        let paginator = query
            .order_by_desc(account::Column::CreatedAt)
            .paginate(&self.db, per_page);
        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(page.saturating_sub(1)).await?;

        let accounts = models
            .iter()
            .map(account::Model::to_domain)
            .collect::<Result<Vec<_>>>()?;
        let items = self.with_profiles(accounts).await?;

        Ok(Page { items, total })
    }

    async fn with_profile(&self, account: Account) -> Result<AccountWithProfile> {
        let profile = match account.role {
            Role::Admin => None,
            Role::Medico => entities::Doctor::find()
                .filter(doctor::Column::AccountId.eq(account.id))
                .one(&self.db)
                .await?
                .map(|m| Profile::Doctor(m.to_domain())),
            Role::Paciente => entities::Patient::find()
                .filter(patient::Column::AccountId.eq(account.id))
                .one(&self.db)
                .await?
                .map(|m| Profile::Patient(m.to_domain())),
        };
        Ok(AccountWithProfile::new(account, profile))
    }

    async fn with_profiles(&self, accounts: Vec<Account>) -> Result<Vec<AccountWithProfile>> {
        let ids: Vec<Uuid> = accounts.iter().map(|a| a.id).collect();

        let mut doctors: HashMap<Uuid, DoctorProfile> = entities::Doctor::find()
            .filter(doctor::Column::AccountId.is_in(ids.clone()))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|m| (m.account_id, m.to_domain()))
            .collect();
        let mut patients: HashMap<Uuid, PatientProfile> = entities::Patient::find()
            .filter(patient::Column::AccountId.is_in(ids))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|m| (m.account_id, m.to_domain()))
            .collect();

        Ok(accounts
            .into_iter()
            .map(|account| {
                let profile = match account.role {
                    Role::Admin => None,
                    Role::Medico => doctors.remove(&account.id).map(Profile::Doctor),
                    Role::Paciente => patients.remove(&account.id).map(Profile::Patient),
                };
                AccountWithProfile::new(account, profile)
            })
            .collect())
    }
}
