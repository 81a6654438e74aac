//! Database integration tests
//!
//! Store operations against a real in-memory SQLite database.

#[cfg(test)]
mod tests {
    use crate::common::{
        RegistrationFactory, TestApp, TestDatabase, days_from_now, doctor_id, patient_id,
    };
    use sus_digital::ApiError;
    use sus_digital::core::models::{
        AppointmentChanges, AppointmentFilter, AppointmentStatus, NewAppointment, Profile, Role,
    };
    use sus_digital::storage::database::AccountFilter;

    #[tokio::test]
    async fn test_database_health_check() {
        let db = TestDatabase::new().await;
        assert!(db.db().health_check().await.is_ok());
        assert!(db.storage().health_check().await);
    }

    #[tokio::test]
    async fn test_migrations_are_idempotent() {
        let db = TestDatabase::new().await;
        assert!(db.db().migrate().await.is_ok());
    }

    #[tokio::test]
    async fn test_registration_transaction_persists_profile() {
        let app = TestApp::new().await;
        let grant = app.register(&RegistrationFactory::doctor()).await;

        let loaded = app
            .database
            .db()
            .find_account_by_id(grant.identity.account.id)
            .await
            .unwrap()
            .expect("account should exist");

        assert_eq!(loaded.account.role, Role::Medico);
        let doctor = loaded
            .profile
            .as_ref()
            .and_then(Profile::as_doctor)
            .expect("doctor profile");
        assert_eq!(doctor.account_id, loaded.account.id);
        assert_eq!(doctor.specialty, "Cardiologia");
    }

    #[tokio::test]
    async fn test_find_account_by_email() {
        let app = TestApp::new().await;
        let request = RegistrationFactory::patient();
        app.register(&request).await;

        let email = request.email.as_deref().unwrap();
        let loaded = app.database.db().find_account_by_email(email).await.unwrap();
        assert!(loaded.is_some());
        assert!(app.database.db().email_exists(email).await.unwrap());
        assert!(!app.database.db().email_exists("nobody@x.com").await.unwrap());
    }

    #[tokio::test]
    async fn test_duplicate_crm_is_duplicate_entry_and_rolls_back() {
        let app = TestApp::new().await;
        let first = RegistrationFactory::doctor();
        app.register(&first).await;

        let mut second = RegistrationFactory::doctor();
        second.crm = first.crm.clone();
        let err = app.auth.register(&second).await.unwrap_err();

        match err {
            ApiError::DuplicateEntry { field } => assert_eq!(field, "crm"),
            other => panic!("expected duplicate entry, got {other:?}"),
        }

        let email = second.email.as_deref().unwrap();
        assert!(!app.database.db().email_exists(email).await.unwrap());
    }

    #[tokio::test]
    async fn test_update_password_and_missing_account() {
        let app = TestApp::new().await;
        let grant = app.register(&RegistrationFactory::admin()).await;
        let db = app.database.db();

        db.update_account_password(grant.identity.account.id, "new-hash")
            .await
            .unwrap();
        let loaded = db
            .find_account_by_id(grant.identity.account.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(loaded.account.password_hash, "new-hash");

        let err = db
            .update_account_password(uuid::Uuid::new_v4(), "x")
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_set_account_active() {
        let app = TestApp::new().await;
        let grant = app.register(&RegistrationFactory::patient()).await;
        let db = app.database.db();

        let updated = db
            .set_account_active(grant.identity.account.id, false)
            .await
            .unwrap()
            .expect("account exists");
        assert!(!updated.account.active);
        assert!(updated.profile.is_some());

        let missing = db
            .set_account_active(uuid::Uuid::new_v4(), false)
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_delete_account_removes_profile() {
        let app = TestApp::new().await;
        let grant = app.register(&RegistrationFactory::doctor()).await;
        let db = app.database.db();
        let doctor_id = grant
            .identity
            .profile
            .as_ref()
            .and_then(Profile::as_doctor)
            .unwrap()
            .id;

        assert!(db.delete_account(grant.identity.account.id).await.unwrap());
        assert!(db.find_doctor(doctor_id).await.unwrap().is_none());
        assert!(
            db.find_account_by_id(grant.identity.account.id)
                .await
                .unwrap()
                .is_none()
        );

        assert!(!db.delete_account(grant.identity.account.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_list_accounts_filters_and_paginates() {
        let app = TestApp::new().await;
        for _ in 0..3 {
            app.register(&RegistrationFactory::patient()).await;
        }
        app.register(&RegistrationFactory::doctor()).await;
        let db = app.database.db();

        let filter = AccountFilter {
            role: Some(Role::Paciente),
            active: None,
        };
        let first = db.list_accounts(&filter, 1, 2).await.unwrap();
        assert_eq!(first.total, 3);
        assert_eq!(first.items.len(), 2);

        let second = db.list_accounts(&filter, 2, 2).await.unwrap();
        assert_eq!(second.items.len(), 1);
        assert!(second.items.iter().all(|a| a.account.role == Role::Paciente));

        let all = db
            .list_accounts(&AccountFilter::default(), 1, 10)
            .await
            .unwrap();
        assert_eq!(all.total, 4);
        assert!(all.items.iter().all(|a| a.profile.is_some()));

        let inactive = AccountFilter {
            role: None,
            active: Some(false),
        };
        assert_eq!(db.list_accounts(&inactive, 1, 10).await.unwrap().total, 0);
    }

    #[tokio::test]
    async fn test_list_accounts_rejects_unreachable_page() {
        let app = TestApp::new().await;
        app.register(&RegistrationFactory::admin()).await;

        let result = app
            .database
            .db()
            .list_accounts(&AccountFilter::default(), u64::MAX, 100)
            .await;

        assert!(matches!(result, Err(ApiError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_directories_are_ordered_by_name() {
        let app = TestApp::new().await;
        for name in ["Dr. Bruno", "Dr. Ana", "Dr. Carla"] {
            let mut request = RegistrationFactory::doctor();
            request.name = Some(name.to_string());
            app.register(&request).await;
        }
        let patient = app.register(&RegistrationFactory::patient()).await;
        let db = app.database.db();

        let doctors = db.list_doctors().await.unwrap();
        let names: Vec<_> = doctors.iter().map(|d| d.profile.name.as_str()).collect();
        assert_eq!(names, vec!["Dr. Ana", "Dr. Bruno", "Dr. Carla"]);
        assert!(doctors.iter().all(|d| d.owner.active));

        let patients = db.list_patients().await.unwrap();
        assert_eq!(patients.len(), 1);
        assert_eq!(patients[0].owner.email, patient.identity.account.email);

        let patient_id = patients[0].profile.id;
        let found = db.find_patient(patient_id).await.unwrap().unwrap();
        assert_eq!(found.profile.cpf, patients[0].profile.cpf);
        assert!(db.find_patient(uuid::Uuid::new_v4()).await.unwrap().is_none());
    }

    // ==================== Appointments ====================

    #[tokio::test]
    async fn test_appointment_lists_are_ordered_and_filtered() {
        let app = TestApp::new().await;
        let doctor = doctor_id(&app.register(&RegistrationFactory::doctor()).await);
        let other_doctor = doctor_id(&app.register(&RegistrationFactory::doctor()).await);
        let patient = patient_id(&app.register(&RegistrationFactory::patient()).await);

        let later = app.schedule(doctor, patient, 5).await;
        let sooner = app.schedule(doctor, patient, 2).await;
        let elsewhere = app.schedule(other_doctor, patient, 3).await;
        let db = app.database.db();

        let all = db
            .list_appointments(&AppointmentFilter::default(), 1, 10)
            .await
            .unwrap();
        let ids: Vec<_> = all.items.iter().map(|c| c.appointment.id).collect();
        assert_eq!(
            ids,
            vec![
                sooner.appointment.id,
                elsewhere.appointment.id,
                later.appointment.id
            ]
        );
        assert_eq!(all.items[0].doctor.specialty, "Cardiologia");
        assert_eq!(all.items[0].patient.name, "Ana Souza");

        let by_doctor = AppointmentFilter {
            doctor_id: Some(doctor),
            ..Default::default()
        };
        let page = db.list_appointments(&by_doctor, 2, 1).await.unwrap();
        assert_eq!(page.total, 2);
        assert_eq!(page.items[0].appointment.id, later.appointment.id);

        let window = AppointmentFilter {
            from: Some(days_from_now(3)),
            until: Some(days_from_now(5)),
            ..Default::default()
        };
        assert_eq!(db.list_appointments(&window, 1, 10).await.unwrap().total, 2);

        let confirmed = AppointmentFilter {
            status: Some(AppointmentStatus::Confirmada),
            ..Default::default()
        };
        assert_eq!(db.list_appointments(&confirmed, 1, 10).await.unwrap().total, 0);

        let agenda = db.appointments_for_doctor(doctor).await.unwrap();
        assert_eq!(agenda[0].appointment.id, sooner.appointment.id);
        let history = db.appointments_for_patient(patient).await.unwrap();
        assert_eq!(history.len(), 3);
        assert_eq!(history[0].appointment.id, later.appointment.id);

        assert!(matches!(
            db.list_appointments(&AppointmentFilter::default(), u64::MAX, 100)
                .await,
            Err(ApiError::Validation { .. })
        ));
    }

    #[tokio::test]
    async fn test_appointment_requires_existing_parties() {
        let app = TestApp::new().await;
        let patient = patient_id(&app.register(&RegistrationFactory::patient()).await);

        let orphan = NewAppointment {
            scheduled_at: days_from_now(1),
            reason: "Retorno".to_string(),
            notes: None,
            doctor_id: uuid::Uuid::new_v4(),
            patient_id: patient,
        };
        let result = app.database.db().create_appointment(&orphan).await;
        assert!(matches!(result, Err(ApiError::ForeignKey)));
    }

    #[tokio::test]
    async fn test_update_and_delete_appointment() {
        let app = TestApp::new().await;
        let doctor = doctor_id(&app.register(&RegistrationFactory::doctor()).await);
        let patient = patient_id(&app.register(&RegistrationFactory::patient()).await);
        let created = app.schedule(doctor, patient, 1).await;
        let id = created.appointment.id;
        let db = app.database.db();

        let changes = AppointmentChanges {
            status: Some(AppointmentStatus::Confirmada),
            notes: Some(Some("Trazer exames".to_string())),
            ..Default::default()
        };
        let updated = db.update_appointment(id, &changes).await.unwrap().unwrap();
        assert_eq!(updated.appointment.status, AppointmentStatus::Confirmada);
        assert_eq!(updated.appointment.notes.as_deref(), Some("Trazer exames"));
        assert_eq!(updated.appointment.reason, created.appointment.reason);

        let cleared = AppointmentChanges {
            notes: Some(None),
            ..Default::default()
        };
        let updated = db.update_appointment(id, &cleared).await.unwrap().unwrap();
        assert!(updated.appointment.notes.is_none());
        assert_eq!(updated.appointment.status, AppointmentStatus::Confirmada);

        let missing = uuid::Uuid::new_v4();
        assert!(db.update_appointment(missing, &changes).await.unwrap().is_none());

        assert!(db.delete_appointment(id).await.unwrap());
        assert!(db.find_appointment(id).await.unwrap().is_none());
        assert!(!db.delete_appointment(id).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_account_refused_while_appointments_exist() {
        let app = TestApp::new().await;
        let doctor = app.register(&RegistrationFactory::doctor()).await;
        let patient = app.register(&RegistrationFactory::patient()).await;
        let booked = app.schedule(doctor_id(&doctor), patient_id(&patient), 1).await;
        let db = app.database.db();

        for grant in [&doctor, &patient] {
            let result = db.delete_account(grant.identity.account.id).await;
            assert!(matches!(
                result,
                Err(ApiError::Validation { ref message, .. })
                    if message == "Não é possível deletar um usuário com consultas vinculadas"
            ));
            assert!(
                db.find_account_by_id(grant.identity.account.id)
                    .await
                    .unwrap()
                    .is_some()
            );
        }

        db.delete_appointment(booked.appointment.id).await.unwrap();
        assert!(db.delete_account(patient.identity.account.id).await.unwrap());
    }
}
