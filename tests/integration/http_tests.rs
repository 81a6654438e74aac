//! HTTP integration tests
//!
//! Requests go through the real application factory, middleware included.

#[cfg(test)]
mod tests {
    use crate::common::{RegistrationFactory, TestApp, days_from_now, doctor_id, patient_id};
    use actix_web::http::StatusCode;
    use actix_web::{test, web};
    use serde_json::{Value, json};
    use sus_digital::core::models::Profile;
    use sus_digital::server::create_app;
    use uuid::Uuid;

    fn without_timestamp(mut body: Value) -> Value {
        if let Some(object) = body.as_object_mut() {
            object.remove("timestamp");
        }
        body
    }

    fn bearer(token: &str) -> (&'static str, String) {
        ("Authorization", format!("Bearer {}", token))
    }

    // ==================== Service Endpoints ====================

    #[actix_web::test]
    async fn test_health_check() {
        let app = TestApp::new().await;
        let service = test::init_service(create_app(web::Data::new(app.state()))).await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let resp = test::call_service(&service, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], "OK");
        assert_eq!(body["service"], "SUS Digital API");
        assert!(body["uptime"].is_u64());
    }

    #[actix_web::test]
    async fn test_api_index_is_public() {
        let app = TestApp::new().await;
        let service = test::init_service(create_app(web::Data::new(app.state()))).await;

        let req = test::TestRequest::get().uri("/api").to_request();
        let resp = test::call_service(&service, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        assert!(body["endpoints"]["auth"].is_object());
    }

    #[actix_web::test]
    async fn test_unknown_route_fallback() {
        let app = TestApp::new().await;
        let service = test::init_service(create_app(web::Data::new(app.state()))).await;

        let req = test::TestRequest::get().uri("/api/nada").to_request();
        let resp = test::call_service(&service, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["erro"], "Rota não encontrada");
        assert_eq!(body["path"], "/api/nada");
        assert_eq!(body["method"], "GET");
    }

    // ==================== Authentication Middleware ====================

    #[actix_web::test]
    async fn test_missing_token_body_identical_on_every_protected_route() {
        let app = TestApp::new().await;
        let service = test::init_service(create_app(web::Data::new(app.state()))).await;
        let id = Uuid::new_v4();

        let requests = vec![
            test::TestRequest::get().uri("/api/auth/me"),
            test::TestRequest::post()
                .uri("/api/auth/change-password")
                .set_json(json!({})),
            test::TestRequest::get().uri("/api/usuarios"),
            test::TestRequest::get().uri(&format!("/api/usuarios/{}", id)),
            test::TestRequest::delete().uri(&format!("/api/usuarios/{}", id)),
            test::TestRequest::get().uri("/api/medicos"),
            test::TestRequest::get().uri(&format!("/api/medicos/{}", id)),
            test::TestRequest::get().uri("/api/pacientes"),
        ];

        let mut bodies = Vec::new();
        for req in requests {
            let resp = test::call_service(&service, req.to_request()).await;
            assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
            let body: Value = test::read_body_json(resp).await;
            bodies.push(without_timestamp(body));
        }

        assert_eq!(bodies[0]["code"], "MISSING_TOKEN");
        assert!(bodies.iter().all(|b| *b == bodies[0]));
    }

    #[actix_web::test]
    async fn test_inactive_account_token_rejected() {
        let app = TestApp::new().await;
        let grant = app.register(&RegistrationFactory::patient()).await;
        app.database
            .db()
            .set_account_active(grant.identity.account.id, false)
            .await
            .unwrap();
        let service = test::init_service(create_app(web::Data::new(app.state()))).await;

        let req = test::TestRequest::get()
            .uri("/api/auth/me")
            .insert_header(bearer(&grant.token))
            .to_request();
        let resp = test::call_service(&service, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], "INVALID_OR_INACTIVE_USER");
    }

    // ==================== Auth Routes ====================

    #[actix_web::test]
    async fn test_register_route_and_duplicate() {
        let app = TestApp::new().await;
        let service = test::init_service(create_app(web::Data::new(app.state()))).await;
        let payload = json!({
            "email": "a@x.com",
            "senha": "senha123",
            "tipo": "PACIENTE",
            "nome": "Ana",
            "cpf": "111"
        });

        let req = test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(&payload)
            .to_request();
        let resp = test::call_service(&service, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Usuário criado com sucesso");
        assert_eq!(body["perfil"]["cpf"], "111");
        assert_eq!(body["user"]["tipo"], "PACIENTE");
        assert_eq!(body["refreshToken"], "");
        assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));

        let req = test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(&payload)
            .to_request();
        let resp = test::call_service(&service, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["erro"], "Email já está em uso");
        assert_eq!(body["code"], "DUPLICATE_EMAIL");
    }

    #[actix_web::test]
    async fn test_register_missing_fields_lists_required() {
        let app = TestApp::new().await;
        let service = test::init_service(create_app(web::Data::new(app.state()))).await;

        let req = test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(json!({"email": "a@x.com"}))
            .to_request();
        let resp = test::call_service(&service, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], "VALIDATION_ERROR");
        assert_eq!(body["required"], json!(["email", "senha", "tipo", "nome"]));
    }

    #[actix_web::test]
    async fn test_malformed_json_is_validation_error() {
        let app = TestApp::new().await;
        let service = test::init_service(create_app(web::Data::new(app.state()))).await;

        let req = test::TestRequest::post()
            .uri("/api/auth/login")
            .insert_header(("Content-Type", "application/json"))
            .set_payload("{not json")
            .to_request();
        let resp = test::call_service(&service, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }

    #[actix_web::test]
    async fn test_login_failures_are_indistinguishable() {
        let app = TestApp::new().await;
        let request = RegistrationFactory::patient();
        app.register(&request).await;
        let service = test::init_service(create_app(web::Data::new(app.state()))).await;
        let email = request.email.clone().unwrap();

        let mut bodies = Vec::new();
        for (email, senha) in [(email.as_str(), "errada99"), ("ghost@x.com", "senha123")] {
            let req = test::TestRequest::post()
                .uri("/api/auth/login")
                .set_json(json!({"email": email, "senha": senha}))
                .to_request();
            let resp = test::call_service(&service, req).await;
            assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
            let body: Value = test::read_body_json(resp).await;
            bodies.push(without_timestamp(body));
        }

        assert_eq!(bodies[0], bodies[1]);
        assert_eq!(bodies[0]["erro"], "Credenciais inválidas");
    }

    #[actix_web::test]
    async fn test_login_then_me() {
        let app = TestApp::new().await;
        let request = RegistrationFactory::doctor();
        app.register(&request).await;
        let service = test::init_service(create_app(web::Data::new(app.state()))).await;
        let email = request.email.clone().unwrap();

        let req = test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(json!({"email": email, "senha": "senha123"}))
            .to_request();
        let resp = test::call_service(&service, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Login realizado com sucesso");
        assert_eq!(body["expiresIn"], "1h");
        let token = body["token"].as_str().unwrap().to_string();

        let req = test::TestRequest::get()
            .uri("/api/auth/me")
            .insert_header(bearer(&token))
            .to_request();
        let resp = test::call_service(&service, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        let usuario = &body["usuario"];
        assert_eq!(usuario["email"], email.as_str());
        assert_eq!(usuario["tipo"], "MEDICO");
        assert_eq!(usuario["ativo"], true);
        assert_eq!(usuario["perfil"]["especialidade"], "Cardiologia");
        assert!(usuario.get("passwordHash").is_none());
        assert!(usuario.get("senha").is_none());
    }

    #[actix_web::test]
    async fn test_change_password_route() {
        let app = TestApp::new().await;
        let grant = app.register(&RegistrationFactory::patient()).await;
        let service = test::init_service(create_app(web::Data::new(app.state()))).await;

        let req = test::TestRequest::post()
            .uri("/api/auth/change-password")
            .insert_header(bearer(&grant.token))
            .set_json(json!({"senhaAtual": "senha123", "novaSenha": "abc"}))
            .to_request();
        let resp = test::call_service(&service, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::post()
            .uri("/api/auth/change-password")
            .insert_header(bearer(&grant.token))
            .set_json(json!({"senhaAtual": "errada99", "novaSenha": "novaSenha1"}))
            .to_request();
        let resp = test::call_service(&service, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], "WRONG_CURRENT_PASSWORD");

        let req = test::TestRequest::post()
            .uri("/api/auth/change-password")
            .insert_header(bearer(&grant.token))
            .set_json(json!({"senhaAtual": "senha123", "novaSenha": "novaSenha1"}))
            .to_request();
        let resp = test::call_service(&service, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Senha alterada com sucesso");
    }

    // ==================== Authorization ====================

    #[actix_web::test]
    async fn test_patient_directory_requires_staff() {
        let app = TestApp::new().await;
        let patient = app.register(&RegistrationFactory::patient()).await;
        let doctor = app.register(&RegistrationFactory::doctor()).await;
        let service = test::init_service(create_app(web::Data::new(app.state()))).await;

        let req = test::TestRequest::get()
            .uri("/api/pacientes")
            .insert_header(bearer(&patient.token))
            .to_request();
        let resp = test::call_service(&service, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], "FORBIDDEN");
        assert_eq!(body["message"], "Permissão necessária: ADMIN ou MEDICO");
        assert_eq!(body["userType"], "PACIENTE");

        let req = test::TestRequest::get()
            .uri("/api/pacientes")
            .insert_header(bearer(&doctor.token))
            .to_request();
        let resp = test::call_service(&service, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body.as_array().map(Vec::len), Some(1));
        assert_eq!(body[0]["usuario"]["email"], patient.identity.account.email.as_str());
    }

    #[actix_web::test]
    async fn test_doctor_directory_open_to_patients() {
        let app = TestApp::new().await;
        let patient = app.register(&RegistrationFactory::patient()).await;
        let doctor = app.register(&RegistrationFactory::doctor()).await;
        let doctor_id = doctor
            .identity
            .profile
            .as_ref()
            .and_then(Profile::as_doctor)
            .unwrap()
            .id;
        let service = test::init_service(create_app(web::Data::new(app.state()))).await;

        let req = test::TestRequest::get()
            .uri(&format!("/api/medicos/{}", doctor_id))
            .insert_header(bearer(&patient.token))
            .to_request();
        let resp = test::call_service(&service, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["crm"], doctor_crm(&doctor));
        assert_eq!(body["usuario"]["ativo"], true);

        let req = test::TestRequest::get()
            .uri(&format!("/api/medicos/{}", Uuid::new_v4()))
            .insert_header(bearer(&patient.token))
            .to_request();
        let resp = test::call_service(&service, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["erro"], "Médico não encontrado");
    }

    fn doctor_crm(grant: &sus_digital::auth::SessionGrant) -> String {
        grant
            .identity
            .profile
            .as_ref()
            .and_then(Profile::as_doctor)
            .map(|d| d.crm.clone())
            .unwrap_or_default()
    }

    #[actix_web::test]
    async fn test_account_owner_or_admin() {
        let app = TestApp::new().await;
        let admin = app.register(&RegistrationFactory::admin()).await;
        let patient = app.register(&RegistrationFactory::patient()).await;
        let other = app.register(&RegistrationFactory::patient()).await;
        let service = test::init_service(create_app(web::Data::new(app.state()))).await;

        let own = format!("/api/usuarios/{}", patient.identity.account.id);
        let foreign = format!("/api/usuarios/{}", other.identity.account.id);

        let req = test::TestRequest::get()
            .uri(&own)
            .insert_header(bearer(&patient.token))
            .to_request();
        assert_eq!(test::call_service(&service, req).await.status(), StatusCode::OK);

        let req = test::TestRequest::get()
            .uri(&foreign)
            .insert_header(bearer(&patient.token))
            .to_request();
        let resp = test::call_service(&service, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Você só pode acessar seus próprios dados");

        let req = test::TestRequest::get()
            .uri(&foreign)
            .insert_header(bearer(&admin.token))
            .to_request();
        let resp = test::call_service(&service, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["email"], other.identity.account.email.as_str());
        assert!(body["perfil"]["cpf"].is_string());

        let req = test::TestRequest::get()
            .uri("/api/usuarios")
            .insert_header(bearer(&patient.token))
            .to_request();
        assert_eq!(
            test::call_service(&service, req).await.status(),
            StatusCode::FORBIDDEN
        );
    }

    #[actix_web::test]
    async fn test_admin_account_management() {
        let app = TestApp::new().await;
        let admin = app.register(&RegistrationFactory::admin()).await;
        let patient = app.register(&RegistrationFactory::patient()).await;
        let service = test::init_service(create_app(web::Data::new(app.state()))).await;
        let patient_uri = format!("/api/usuarios/{}", patient.identity.account.id);

        let req = test::TestRequest::get()
            .uri("/api/usuarios?page=1&limit=1&tipo=PACIENTE")
            .insert_header(bearer(&admin.token))
            .to_request();
        let resp = test::call_service(&service, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(
            body["pagination"],
            json!({"total": 1, "pages": 1, "currentPage": 1, "perPage": 1})
        );

        let req = test::TestRequest::put()
            .uri(&patient_uri)
            .insert_header(bearer(&admin.token))
            .set_json(json!({"ativo": false}))
            .to_request();
        let resp = test::call_service(&service, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["usuario"]["ativo"], false);

        let req = test::TestRequest::delete()
            .uri(&format!("/api/usuarios/{}", admin.identity.account.id))
            .insert_header(bearer(&admin.token))
            .to_request();
        let resp = test::call_service(&service, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["erro"], "Você não pode deletar sua própria conta");

        let req = test::TestRequest::delete()
            .uri(&patient_uri)
            .insert_header(bearer(&admin.token))
            .to_request();
        assert_eq!(test::call_service(&service, req).await.status(), StatusCode::OK);

        let req = test::TestRequest::get()
            .uri(&patient_uri)
            .insert_header(bearer(&admin.token))
            .to_request();
        let resp = test::call_service(&service, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["erro"], "Usuário não encontrado");
    }

    #[actix_web::test]
    async fn test_unreachable_page_is_validation_error() {
        let app = TestApp::new().await;
        let admin = app.register(&RegistrationFactory::admin()).await;
        let service = test::init_service(create_app(web::Data::new(app.state()))).await;

        let req = test::TestRequest::get()
            .uri("/api/usuarios?page=18446744073709551615&limit=100")
            .insert_header(bearer(&admin.token))
            .to_request();
        let resp = test::call_service(&service, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }

    #[actix_web::test]
    async fn test_invalid_role_filter() {
        let app = TestApp::new().await;
        let admin = app.register(&RegistrationFactory::admin()).await;
        let service = test::init_service(create_app(web::Data::new(app.state()))).await;

        let req = test::TestRequest::get()
            .uri("/api/usuarios?tipo=ENFERMEIRO")
            .insert_header(bearer(&admin.token))
            .to_request();
        let resp = test::call_service(&service, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["allowed"], json!(["ADMIN", "MEDICO", "PACIENTE"]));
    }

    // ==================== Appointments ====================

    #[actix_web::test]
    async fn test_schedule_appointment_roles_and_validation() {
        let app = TestApp::new().await;
        let doctor = app.register(&RegistrationFactory::doctor()).await;
        let patient = app.register(&RegistrationFactory::patient()).await;
        let service = test::init_service(create_app(web::Data::new(app.state()))).await;

        let body = json!({
            "dataHora": days_from_now(3).to_rfc3339(),
            "motivo": "Consulta de rotina",
            "medicoId": doctor_id(&doctor),
            "pacienteId": patient_id(&patient),
        });

        let req = test::TestRequest::post()
            .uri("/api/consultas")
            .insert_header(bearer(&patient.token))
            .set_json(&body)
            .to_request();
        let resp = test::call_service(&service, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let mut past = body.clone();
        past["dataHora"] = json!(days_from_now(-1).to_rfc3339());
        let req = test::TestRequest::post()
            .uri("/api/consultas")
            .insert_header(bearer(&doctor.token))
            .set_json(&past)
            .to_request();
        let resp = test::call_service(&service, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let resp_body: Value = test::read_body_json(resp).await;
        assert_eq!(resp_body["erro"], "Data da consulta não pode ser no passado");

        let mut unknown = body.clone();
        unknown["pacienteId"] = json!(Uuid::new_v4());
        let req = test::TestRequest::post()
            .uri("/api/consultas")
            .insert_header(bearer(&doctor.token))
            .set_json(&unknown)
            .to_request();
        let resp = test::call_service(&service, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let resp_body: Value = test::read_body_json(resp).await;
        assert_eq!(resp_body["erro"], "Paciente não encontrado");

        let req = test::TestRequest::post()
            .uri("/api/consultas")
            .insert_header(bearer(&doctor.token))
            .set_json(json!({"motivo": "Retorno"}))
            .to_request();
        let resp = test::call_service(&service, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let resp_body: Value = test::read_body_json(resp).await;
        assert_eq!(
            resp_body["required"],
            json!(["dataHora", "motivo", "medicoId", "pacienteId"])
        );

        let req = test::TestRequest::post()
            .uri("/api/consultas")
            .insert_header(bearer(&doctor.token))
            .set_json(&body)
            .to_request();
        let resp = test::call_service(&service, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let resp_body: Value = test::read_body_json(resp).await;
        assert_eq!(resp_body["message"], "Consulta criada com sucesso");
        assert_eq!(resp_body["consulta"]["status"], "AGENDADA");
        assert_eq!(resp_body["consulta"]["medico"]["especialidade"], "Cardiologia");
        assert!(resp_body["consulta"]["paciente"]["cpf"].is_string());
    }

    #[actix_web::test]
    async fn test_appointment_listing_is_scoped_to_caller() {
        let app = TestApp::new().await;
        let admin = app.register(&RegistrationFactory::admin()).await;
        let doctor = app.register(&RegistrationFactory::doctor()).await;
        let other_doctor = app.register(&RegistrationFactory::doctor()).await;
        let patient = app.register(&RegistrationFactory::patient()).await;
        let other_patient = app.register(&RegistrationFactory::patient()).await;
        app.schedule(doctor_id(&doctor), patient_id(&patient), 1).await;
        app.schedule(doctor_id(&other_doctor), patient_id(&patient), 2).await;
        app.schedule(doctor_id(&other_doctor), patient_id(&other_patient), 3).await;
        let service = test::init_service(create_app(web::Data::new(app.state()))).await;

        for (token, expected) in [
            (&admin.token, 3),
            (&doctor.token, 1),
            (&other_doctor.token, 2),
            (&patient.token, 2),
            (&other_patient.token, 1),
        ] {
            let req = test::TestRequest::get()
                .uri("/api/consultas")
                .insert_header(bearer(token))
                .to_request();
            let resp = test::call_service(&service, req).await;
            assert_eq!(resp.status(), StatusCode::OK);
            let body: Value = test::read_body_json(resp).await;
            assert_eq!(body["pagination"]["total"], expected);
            assert_eq!(body["consultas"].as_array().unwrap().len(), expected);
            assert_eq!(body["pagination"]["perPage"], 100);
            assert_eq!(body["pagination"]["hasNext"], false);
        }

        let req = test::TestRequest::get()
            .uri(&format!("/api/consultas?medicoId={}", doctor_id(&other_doctor)))
            .insert_header(bearer(&doctor.token))
            .to_request();
        let body: Value = test::read_body_json(test::call_service(&service, req).await).await;
        assert_eq!(body["pagination"]["total"], 1);

        let req = test::TestRequest::get()
            .uri("/api/consultas?limit=1&status=AGENDADA")
            .insert_header(bearer(&admin.token))
            .to_request();
        let body: Value = test::read_body_json(test::call_service(&service, req).await).await;
        assert_eq!(body["pagination"]["pages"], 3);
        assert_eq!(body["pagination"]["hasNext"], true);
        assert_eq!(body["pagination"]["hasPrev"], false);
    }

    #[actix_web::test]
    async fn test_appointment_access_by_owner() {
        let app = TestApp::new().await;
        let doctor = app.register(&RegistrationFactory::doctor()).await;
        let other_doctor = app.register(&RegistrationFactory::doctor()).await;
        let patient = app.register(&RegistrationFactory::patient()).await;
        let booked = app.schedule(doctor_id(&doctor), patient_id(&patient), 1).await;
        let uri = format!("/api/consultas/{}", booked.appointment.id);
        let service = test::init_service(create_app(web::Data::new(app.state()))).await;

        for token in [&doctor.token, &patient.token] {
            let req = test::TestRequest::get()
                .uri(&uri)
                .insert_header(bearer(token))
                .to_request();
            let resp = test::call_service(&service, req).await;
            assert_eq!(resp.status(), StatusCode::OK);
            let body: Value = test::read_body_json(resp).await;
            assert_eq!(body["id"], booked.appointment.id.to_string());
            assert_eq!(body["motivo"], "Consulta de rotina");
        }

        let req = test::TestRequest::get()
            .uri(&uri)
            .insert_header(bearer(&other_doctor.token))
            .to_request();
        let resp = test::call_service(&service, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["erro"], "Acesso negado");

        let update = json!({"status": "CONFIRMADA", "observacoes": "Jejum de 8h"});
        let req = test::TestRequest::put()
            .uri(&uri)
            .insert_header(bearer(&other_doctor.token))
            .set_json(&update)
            .to_request();
        assert_eq!(
            test::call_service(&service, req).await.status(),
            StatusCode::FORBIDDEN
        );

        let req = test::TestRequest::put()
            .uri(&uri)
            .insert_header(bearer(&patient.token))
            .set_json(&update)
            .to_request();
        assert_eq!(
            test::call_service(&service, req).await.status(),
            StatusCode::FORBIDDEN
        );

        let req = test::TestRequest::put()
            .uri(&uri)
            .insert_header(bearer(&doctor.token))
            .set_json(json!({"status": "ADIADA"}))
            .to_request();
        let resp = test::call_service(&service, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(
            body["allowed"],
            json!(["AGENDADA", "CONFIRMADA", "REALIZADA", "CANCELADA"])
        );

        let req = test::TestRequest::put()
            .uri(&uri)
            .insert_header(bearer(&doctor.token))
            .set_json(&update)
            .to_request();
        let resp = test::call_service(&service, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Consulta atualizada com sucesso");
        assert_eq!(body["consulta"]["status"], "CONFIRMADA");
        assert_eq!(body["consulta"]["observacoes"], "Jejum de 8h");

        let req = test::TestRequest::get()
            .uri(&format!("/api/consultas/{}", Uuid::new_v4()))
            .insert_header(bearer(&doctor.token))
            .to_request();
        let resp = test::call_service(&service, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["erro"], "Consulta não encontrada");
    }

    #[actix_web::test]
    async fn test_delete_appointment_is_admin_only() {
        let app = TestApp::new().await;
        let admin = app.register(&RegistrationFactory::admin()).await;
        let doctor = app.register(&RegistrationFactory::doctor()).await;
        let patient = app.register(&RegistrationFactory::patient()).await;
        let booked = app.schedule(doctor_id(&doctor), patient_id(&patient), 1).await;
        let uri = format!("/api/consultas/{}", booked.appointment.id);
        let service = test::init_service(create_app(web::Data::new(app.state()))).await;

        let req = test::TestRequest::delete()
            .uri(&uri)
            .insert_header(bearer(&doctor.token))
            .to_request();
        assert_eq!(
            test::call_service(&service, req).await.status(),
            StatusCode::FORBIDDEN
        );

        let req = test::TestRequest::delete()
            .uri(&format!("/api/usuarios/{}", patient.identity.account.id))
            .insert_header(bearer(&admin.token))
            .to_request();
        let resp = test::call_service(&service, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(
            body["erro"],
            "Não é possível deletar um usuário com consultas vinculadas"
        );

        let req = test::TestRequest::delete()
            .uri(&uri)
            .insert_header(bearer(&admin.token))
            .to_request();
        let resp = test::call_service(&service, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Consulta deletada com sucesso");

        let req = test::TestRequest::delete()
            .uri(&uri)
            .insert_header(bearer(&admin.token))
            .to_request();
        assert_eq!(
            test::call_service(&service, req).await.status(),
            StatusCode::NOT_FOUND
        );
    }

    #[actix_web::test]
    async fn test_agenda_and_history_routes() {
        let app = TestApp::new().await;
        let doctor = app.register(&RegistrationFactory::doctor()).await;
        let other_doctor = app.register(&RegistrationFactory::doctor()).await;
        let patient = app.register(&RegistrationFactory::patient()).await;
        let other_patient = app.register(&RegistrationFactory::patient()).await;
        let first = app.schedule(doctor_id(&doctor), patient_id(&patient), 1).await;
        let second = app.schedule(doctor_id(&doctor), patient_id(&other_patient), 2).await;
        let third = app.schedule(doctor_id(&other_doctor), patient_id(&patient), 3).await;
        let service = test::init_service(create_app(web::Data::new(app.state()))).await;

        let agenda = format!("/api/consultas/medico/{}", doctor_id(&doctor));
        let req = test::TestRequest::get()
            .uri(&agenda)
            .insert_header(bearer(&doctor.token))
            .to_request();
        let body: Value = test::read_body_json(test::call_service(&service, req).await).await;
        let ids: Vec<_> = body.as_array().unwrap().iter().map(|c| c["id"].clone()).collect();
        assert_eq!(
            ids,
            vec![
                json!(first.appointment.id),
                json!(second.appointment.id)
            ]
        );

        let req = test::TestRequest::get()
            .uri(&agenda)
            .insert_header(bearer(&other_doctor.token))
            .to_request();
        assert_eq!(
            test::call_service(&service, req).await.status(),
            StatusCode::FORBIDDEN
        );

        let req = test::TestRequest::get()
            .uri(&agenda)
            .insert_header(bearer(&patient.token))
            .to_request();
        let body: Value = test::read_body_json(test::call_service(&service, req).await).await;
        assert_eq!(body.as_array().unwrap().len(), 1);

        let history = format!("/api/consultas/paciente/{}", patient_id(&patient));
        let req = test::TestRequest::get()
            .uri(&history)
            .insert_header(bearer(&patient.token))
            .to_request();
        let body: Value = test::read_body_json(test::call_service(&service, req).await).await;
        let ids: Vec<_> = body.as_array().unwrap().iter().map(|c| c["id"].clone()).collect();
        assert_eq!(
            ids,
            vec![
                json!(third.appointment.id),
                json!(first.appointment.id)
            ]
        );

        let req = test::TestRequest::get()
            .uri(&history)
            .insert_header(bearer(&other_patient.token))
            .to_request();
        assert_eq!(
            test::call_service(&service, req).await.status(),
            StatusCode::FORBIDDEN
        );
    }
}
