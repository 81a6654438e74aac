use crate::core::models::{
    Account, DoctorProfile, NewDoctorProfile, NewPatientProfile, PatientProfile, Role,
};
use crate::utils::error::Result;
use sea_orm::*;
use tracing::debug;
use uuid::Uuid;

use super::super::entities::{account, doctor, patient};
use super::types::{RegistrationTx, SeaOrmDatabase};

impl SeaOrmDatabase {
    /// Start the transaction an account and its profile are created in
    pub async fn begin_registration(&self) -> Result<RegistrationTx> {
        let txn = self.db.begin().await?;
        Ok(RegistrationTx { txn })
    }
}

impl RegistrationTx {
    pub async fn insert_account(
        &self,
        email: &str,
        password_hash: &str,
        role: Role,
    ) -> Result<Account> {
        debug!("Inserting {} account: {}", role, email);

        let model = account::Model::new_active(email, password_hash, role)
            .insert(&self.txn)
            .await?;
        model.to_domain()
    }

    pub async fn insert_doctor(
        &self,
        account_id: Uuid,
        profile: &NewDoctorProfile,
    ) -> Result<DoctorProfile> {
        let model = doctor::Model::new_active(account_id, profile)
            .insert(&self.txn)
            .await?;
        Ok(model.to_domain())
    }

    pub async fn insert_patient(
        &self,
        account_id: Uuid,
        profile: &NewPatientProfile,
    ) -> Result<PatientProfile> {
        let model = patient::Model::new_active(account_id, profile)
            .insert(&self.txn)
            .await?;
        Ok(model.to_domain())
    }

    pub async fn commit(self) -> Result<()> {
        self.txn.commit().await?;
        Ok(())
    }

    pub async fn rollback(self) -> Result<()> {
        self.txn.rollback().await?;
        Ok(())
    }
}
