//! 课程与资料接口的端到端测试

#[macro_use]
mod common;

use actix_web::http::{StatusCode, header};
use actix_web::test::{self, TestRequest};
use serde_json::json;

use common::{TestContext, bearer, ids, multipart_body, multipart_content_type};

#[actix_web::test]
async fn test_health_check() {
    let ctx = TestContext::new().await;
    let app = init_app!(ctx);

    let (status, json) = call_json!(app, TestRequest::get().uri("/api/health"));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "OK");
    assert_eq!(json["message"], "LMS API is running");
}

#[actix_web::test]
async fn test_course_catalog_and_enrollment() {
    let ctx = TestContext::new().await;
    let app = init_app!(ctx);

    let (teacher, teacher_id) = register!(
        app,
        "teacher",
        "Dr. Jane Teacher",
        "teacher@example.com",
        json!({"department": "Computer Science"})
    );
    let (student, student_id) = register!(
        app,
        "student",
        "John Student",
        "student@example.com",
        json!({"studentId": "STU001"})
    );

    let (status, json) = call_json!(
        app,
        TestRequest::post()
            .uri("/api/courses")
            .insert_header(bearer(&teacher))
            .set_json(json!({"title": "Introduction to Programming", "code": "cs101"}))
    );
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["data"]["code"], "CS101");
    assert_eq!(json["data"]["teacher"]["id"], teacher_id);
    let course_id = json["data"]["id"].as_i64().unwrap();

    // 可选课程列表展示教师院系，不返回选课学生
    let (status, json) = call_json!(
        app,
        TestRequest::get()
            .uri("/api/courses/available")
            .insert_header(bearer(&student))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["count"], 1);
    assert_eq!(json["data"][0]["teacher"]["department"], "Computer Science");
    assert!(json["data"][0].get("enrolledStudents").is_none());

    // 选课前学生看不到课程详情
    let (status, json) = call_json!(
        app,
        TestRequest::get()
            .uri(&format!("/api/courses/{course_id}"))
            .insert_header(bearer(&student))
    );
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["message"], "Not enrolled in this course");

    let (status, json) = call_json!(
        app,
        TestRequest::post()
            .uri(&format!("/api/courses/{course_id}/enroll"))
            .insert_header(bearer(&student))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Successfully enrolled in course");
    assert_eq!(json["data"]["enrolledStudents"][0]["id"], student_id);

    // 重复选课
    let (status, json) = call_json!(
        app,
        TestRequest::post()
            .uri(&format!("/api/courses/{course_id}/enroll"))
            .insert_header(bearer(&student))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "AlreadyEnrolled");
    assert_eq!(json["message"], "Already enrolled in this course");

    let (status, json) = call_json!(
        app,
        TestRequest::get()
            .uri("/api/courses")
            .insert_header(bearer(&student))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&json), vec![course_id]);
    assert_eq!(json["data"][0]["enrolledStudents"].as_array().unwrap().len(), 1);

    let (status, json) = call_json!(
        app,
        TestRequest::get()
            .uri(&format!("/api/courses/{course_id}"))
            .insert_header(bearer(&student))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["enrolledStudents"][0]["studentId"], "STU001");
    assert_eq!(json["data"]["teacher"]["department"], "Computer Science");
}

#[actix_web::test]
async fn test_courses_are_listed_newest_first() {
    let ctx = TestContext::new().await;
    let app = init_app!(ctx);

    let (teacher, _) = register!(app, "teacher", "Teacher", "t@example.com");
    let mut created = Vec::new();
    for code in ["A100", "B200", "C300"] {
        let (status, json) = call_json!(
            app,
            TestRequest::post()
                .uri("/api/courses")
                .insert_header(bearer(&teacher))
                .set_json(json!({"title": format!("Course {code}"), "code": code}))
        );
        assert_eq!(status, StatusCode::CREATED);
        created.push(json["data"]["id"].as_i64().unwrap());
    }

    let (_, json) = call_json!(
        app,
        TestRequest::get()
            .uri("/api/courses")
            .insert_header(bearer(&teacher))
    );
    created.reverse();
    assert_eq!(ids(&json), created);
}

#[actix_web::test]
async fn test_duplicate_course_code_rejected() {
    let ctx = TestContext::new().await;
    let app = init_app!(ctx);

    let (teacher, _) = register!(app, "teacher", "Teacher", "t@example.com");
    let create = || {
        TestRequest::post()
            .uri("/api/courses")
            .insert_header(bearer(&teacher))
            .set_json(json!({"title": "Algorithms", "code": "CS201"}))
    };

    let (status, _) = call_json!(app, create());
    assert_eq!(status, StatusCode::CREATED);

    let (status, json) = call_json!(app, create());
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "ValidationError");
}

#[actix_web::test]
async fn test_only_owner_can_modify_course() {
    let ctx = TestContext::new().await;
    let app = init_app!(ctx);

    let (owner, _) = register!(app, "teacher", "Owner", "owner@example.com");
    let (other, _) = register!(app, "teacher", "Other", "other@example.com");

    let (_, json) = call_json!(
        app,
        TestRequest::post()
            .uri("/api/courses")
            .insert_header(bearer(&owner))
            .set_json(json!({"title": "Databases", "code": "DB101"}))
    );
    let course_id = json["data"]["id"].as_i64().unwrap();

    let (status, _) = call_json!(
        app,
        TestRequest::put()
            .uri(&format!("/api/courses/{course_id}"))
            .insert_header(bearer(&other))
            .set_json(json!({"title": "Hijacked"}))
    );
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = call_json!(
        app,
        TestRequest::delete()
            .uri(&format!("/api/courses/{course_id}"))
            .insert_header(bearer(&other))
    );
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = call_json!(
        app,
        TestRequest::post()
            .uri("/api/materials")
            .insert_header(bearer(&other))
            .set_json(json!({"title": "Notes", "courseId": course_id}))
    );
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, json) = call_json!(
        app,
        TestRequest::put()
            .uri(&format!("/api/courses/{course_id}"))
            .insert_header(bearer(&owner))
            .set_json(json!({"title": "Advanced Databases", "description": "Indexes"}))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["title"], "Advanced Databases");
    assert_eq!(json["data"]["code"], "DB101");

    let (status, _) = call_json!(
        app,
        TestRequest::get()
            .uri("/api/courses/9999")
            .insert_header(bearer(&owner))
    );
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_material_type_inference() {
    let ctx = TestContext::new().await;
    let app = init_app!(ctx);

    let (teacher, _) = register!(app, "teacher", "Teacher", "t@example.com");
    let (_, json) = call_json!(
        app,
        TestRequest::post()
            .uri("/api/courses")
            .insert_header(bearer(&teacher))
            .set_json(json!({"title": "Networks", "code": "NET1"}))
    );
    let course_id = json["data"]["id"].as_i64().unwrap();

    let (status, json) = call_json!(
        app,
        TestRequest::post()
            .uri("/api/materials")
            .insert_header(bearer(&teacher))
            .set_json(json!({
                "title": "RFC 793",
                "courseId": course_id.to_string(),
                "linkUrl": "https://www.rfc-editor.org/rfc/rfc793"
            }))
    );
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["data"]["materialType"], "link");
    assert_eq!(json["data"]["linkUrl"], "https://www.rfc-editor.org/rfc/rfc793");
    assert_eq!(json["data"]["course"], course_id);

    let (status, json) = call_json!(
        app,
        TestRequest::post()
            .uri("/api/materials")
            .insert_header(bearer(&teacher))
            .set_json(json!({"title": "Reading list", "courseId": course_id}))
    );
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["data"]["materialType"], "text");
    assert!(json["data"].get("linkUrl").is_none());
    let text_id = json["data"]["id"].as_i64().unwrap();

    // 显式类型与内容矛盾
    let (status, json) = call_json!(
        app,
        TestRequest::post()
            .uri("/api/materials")
            .insert_header(bearer(&teacher))
            .set_json(json!({"title": "Broken", "courseId": course_id, "materialType": "link"}))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "ValidationError");

    let (status, _) = call_json!(
        app,
        TestRequest::post()
            .uri("/api/materials")
            .insert_header(bearer(&teacher))
            .set_json(json!({"courseId": course_id}))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = call_json!(
        app,
        TestRequest::post()
            .uri("/api/materials")
            .insert_header(bearer(&teacher))
            .set_json(json!({"title": "Orphan", "courseId": 4242}))
    );
    assert_eq!(status, StatusCode::NOT_FOUND);

    // 文本资料改为链接
    let (status, json) = call_json!(
        app,
        TestRequest::put()
            .uri(&format!("/api/materials/{text_id}"))
            .insert_header(bearer(&teacher))
            .set_json(json!({"linkUrl": "https://example.com/reading"}))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["materialType"], "link");
    assert_eq!(json["data"]["title"], "Reading list");

    let (status, json) = call_json!(
        app,
        TestRequest::get()
            .uri(&format!("/api/materials/course/{course_id}"))
            .insert_header(bearer(&teacher))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["count"], 2);
}

#[actix_web::test]
async fn test_student_material_access_requires_enrollment() {
    let ctx = TestContext::new().await;
    let app = init_app!(ctx);

    let (teacher, _) = register!(app, "teacher", "Teacher", "t@example.com");
    let (student, _) = register!(app, "student", "Student", "s@example.com");

    let (_, json) = call_json!(
        app,
        TestRequest::post()
            .uri("/api/courses")
            .insert_header(bearer(&teacher))
            .set_json(json!({"title": "Compilers", "code": "CMP1"}))
    );
    let course_id = json["data"]["id"].as_i64().unwrap();

    let (_, json) = call_json!(
        app,
        TestRequest::post()
            .uri("/api/materials")
            .insert_header(bearer(&teacher))
            .set_json(json!({"title": "Lexing", "courseId": course_id}))
    );
    let material_id = json["data"]["id"].as_i64().unwrap();

    let (status, json) = call_json!(
        app,
        TestRequest::get()
            .uri(&format!("/api/materials/course/{course_id}"))
            .insert_header(bearer(&student))
    );
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["message"], "Not enrolled in this course");

    let (status, _) = call_json!(
        app,
        TestRequest::get()
            .uri(&format!("/api/materials/{material_id}"))
            .insert_header(bearer(&student))
    );
    assert_eq!(status, StatusCode::FORBIDDEN);

    call_json!(
        app,
        TestRequest::post()
            .uri(&format!("/api/courses/{course_id}/enroll"))
            .insert_header(bearer(&student))
    );

    let (status, json) = call_json!(
        app,
        TestRequest::get()
            .uri(&format!("/api/materials/{material_id}"))
            .insert_header(bearer(&student))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["title"], "Lexing");

    // 学生不能修改资料
    let (status, _) = call_json!(
        app,
        TestRequest::delete()
            .uri(&format!("/api/materials/{material_id}"))
            .insert_header(bearer(&student))
    );
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_file_material_lifecycle() {
    let ctx = TestContext::new().await;
    let app = init_app!(ctx);

    let (teacher, _) = register!(app, "teacher", "Teacher", "t@example.com");
    let (_, json) = call_json!(
        app,
        TestRequest::post()
            .uri("/api/courses")
            .insert_header(bearer(&teacher))
            .set_json(json!({"title": "Operating Systems", "code": "OS1"}))
    );
    let course_id = json["data"]["id"].as_i64().unwrap();

    let body = multipart_body(
        &[("title", "Lecture 1"), ("courseId", &course_id.to_string())],
        Some(("lecture1.pdf", "application/pdf", b"%PDF-1.4 slides".as_slice())),
    );
    let (status, json) = call_json!(
        app,
        TestRequest::post()
            .uri("/api/materials")
            .insert_header(bearer(&teacher))
            .insert_header(multipart_content_type())
            .set_payload(body)
    );
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["data"]["materialType"], "file");
    assert_eq!(json["data"]["fileName"], "lecture1.pdf");
    assert_eq!(json["data"]["fileType"], "application/pdf");
    let material_id = json["data"]["id"].as_i64().unwrap();
    let file_url = json["data"]["fileUrl"].as_str().unwrap().to_string();
    assert!(file_url.starts_with("/uploads/materials/"));
    assert!(file_url.ends_with(".pdf"));

    let path = ctx.upload_path(&file_url);
    assert!(path.exists());

    // 上传文件公开访问
    let resp = test::call_service(&app, TestRequest::get().uri(&file_url).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = test::read_body(resp).await;
    assert_eq!(&bytes[..], b"%PDF-1.4 slides");

    // 用链接替换文件后旧文件被删除
    let (status, json) = call_json!(
        app,
        TestRequest::put()
            .uri(&format!("/api/materials/{material_id}"))
            .insert_header(bearer(&teacher))
            .set_json(json!({"linkUrl": "https://example.com/slides"}))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["materialType"], "link");
    assert!(json["data"].get("fileUrl").is_none());
    assert!(!path.exists());

    let (status, json) = call_json!(
        app,
        TestRequest::delete()
            .uri(&format!("/api/materials/{material_id}"))
            .insert_header(bearer(&teacher))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Material deleted successfully");

    let (status, _) = call_json!(
        app,
        TestRequest::get()
            .uri(&format!("/api/materials/{material_id}"))
            .insert_header(bearer(&teacher))
    );
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_rename_file_material_with_explicit_type() {
    let ctx = TestContext::new().await;
    let app = init_app!(ctx);

    let (teacher, _) = register!(app, "teacher", "Teacher", "t@example.com");
    let (_, json) = call_json!(
        app,
        TestRequest::post()
            .uri("/api/courses")
            .insert_header(bearer(&teacher))
            .set_json(json!({"title": "Compilers", "code": "CC1"}))
    );
    let course_id = json["data"]["id"].as_i64().unwrap();

    let body = multipart_body(
        &[("title", "Parsing"), ("courseId", &course_id.to_string())],
        Some(("parsing.pdf", "application/pdf", b"%PDF-1.4 grammar".as_slice())),
    );
    let (status, json) = call_json!(
        app,
        TestRequest::post()
            .uri("/api/materials")
            .insert_header(bearer(&teacher))
            .insert_header(multipart_content_type())
            .set_payload(body)
    );
    assert_eq!(status, StatusCode::CREATED);
    let material_id = json["data"]["id"].as_i64().unwrap();
    let file_url = json["data"]["fileUrl"].as_str().unwrap().to_string();

    // 类型与当前一致时只改标题
    let (status, json) = call_json!(
        app,
        TestRequest::put()
            .uri(&format!("/api/materials/{material_id}"))
            .insert_header(bearer(&teacher))
            .set_json(json!({"title": "Renamed", "materialType": "file"}))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["title"], "Renamed");
    assert_eq!(json["data"]["materialType"], "file");
    assert_eq!(json["data"]["fileUrl"], file_url.as_str());
    assert_eq!(json["data"]["fileName"], "parsing.pdf");
    assert!(ctx.upload_path(&file_url).exists());

    // 没有新内容时切换到其他非文本类型仍然拒绝
    let (status, json) = call_json!(
        app,
        TestRequest::put()
            .uri(&format!("/api/materials/{material_id}"))
            .insert_header(bearer(&teacher))
            .set_json(json!({"materialType": "link"}))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);
    assert!(ctx.upload_path(&file_url).exists());
}

#[actix_web::test]
async fn test_teachers_only_see_and_modify_their_own() {
    let ctx = TestContext::new().await;
    let app = init_app!(ctx);

    let (first, _) = register!(app, "teacher", "First", "first@example.com");
    let (second, _) = register!(app, "teacher", "Second", "second@example.com");

    let (_, json) = call_json!(
        app,
        TestRequest::post()
            .uri("/api/courses")
            .insert_header(bearer(&first))
            .set_json(json!({"title": "Algorithms", "code": "ALG1"}))
    );
    let first_course = json["data"]["id"].as_i64().unwrap();
    let (_, json) = call_json!(
        app,
        TestRequest::post()
            .uri("/api/courses")
            .insert_header(bearer(&second))
            .set_json(json!({"title": "Graphics", "code": "GFX1"}))
    );
    let second_course = json["data"]["id"].as_i64().unwrap();

    let (status, json) = call_json!(
        app,
        TestRequest::post()
            .uri("/api/materials")
            .insert_header(bearer(&first))
            .set_json(json!({"title": "Sorting", "courseId": first_course}))
    );
    assert_eq!(status, StatusCode::CREATED);
    let material_id = json["data"]["id"].as_i64().unwrap();

    let (status, json) = call_json!(
        app,
        TestRequest::put()
            .uri(&format!("/api/materials/{material_id}"))
            .insert_header(bearer(&second))
            .set_json(json!({"title": "Hijacked"}))
    );
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["success"], false);

    let (status, _) = call_json!(
        app,
        TestRequest::delete()
            .uri(&format!("/api/materials/{material_id}"))
            .insert_header(bearer(&second))
    );
    assert_eq!(status, StatusCode::FORBIDDEN);

    // 资料未被改动
    let (status, json) = call_json!(
        app,
        TestRequest::get()
            .uri(&format!("/api/materials/{material_id}"))
            .insert_header(bearer(&first))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["title"], "Sorting");

    let (status, json) = call_json!(
        app,
        TestRequest::get()
            .uri("/api/courses")
            .insert_header(bearer(&second))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&json), vec![second_course]);

    let (_, json) = call_json!(
        app,
        TestRequest::get()
            .uri("/api/courses")
            .insert_header(bearer(&first))
    );
    assert_eq!(ids(&json), vec![first_course]);
}

#[actix_web::test]
async fn test_uploaded_html_served_as_download() {
    let ctx = TestContext::new().await;
    let app = init_app!(ctx);

    let (teacher, _) = register!(app, "teacher", "Teacher", "t@example.com");
    let (_, json) = call_json!(
        app,
        TestRequest::post()
            .uri("/api/courses")
            .insert_header(bearer(&teacher))
            .set_json(json!({"title": "Web Security", "code": "SEC1"}))
    );
    let course_id = json["data"]["id"].as_i64().unwrap();

    let page = b"<html><script>alert(document.cookie)</script></html>";
    let body = multipart_body(
        &[("title", "Demo page"), ("courseId", &course_id.to_string())],
        Some(("page.html", "text/html", page.as_slice())),
    );
    let (status, json) = call_json!(
        app,
        TestRequest::post()
            .uri("/api/materials")
            .insert_header(bearer(&teacher))
            .insert_header(multipart_content_type())
            .set_payload(body)
    );
    assert_eq!(status, StatusCode::CREATED);
    let file_url = json["data"]["fileUrl"].as_str().unwrap().to_string();

    let resp = test::call_service(&app, TestRequest::get().uri(&file_url).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let headers = resp.headers();
    assert_eq!(
        headers.get(header::CONTENT_TYPE).unwrap(),
        "application/octet-stream"
    );
    assert_eq!(headers.get(header::X_CONTENT_TYPE_OPTIONS).unwrap(), "nosniff");
    assert_eq!(headers.get(header::CONTENT_DISPOSITION).unwrap(), "attachment");
    let bytes = test::read_body(resp).await;
    assert_eq!(&bytes[..], page.as_slice());

    // 普通文档保持原类型内联展示
    let body = multipart_body(
        &[("title", "Notes"), ("courseId", &course_id.to_string())],
        Some(("notes.pdf", "application/pdf", b"%PDF-1.4 notes".as_slice())),
    );
    let (_, json) = call_json!(
        app,
        TestRequest::post()
            .uri("/api/materials")
            .insert_header(bearer(&teacher))
            .insert_header(multipart_content_type())
            .set_payload(body)
    );
    let file_url = json["data"]["fileUrl"].as_str().unwrap().to_string();
    let resp = test::call_service(&app, TestRequest::get().uri(&file_url).to_request()).await;
    assert_eq!(resp.headers().get(header::CONTENT_TYPE).unwrap(), "application/pdf");
    assert_eq!(resp.headers().get(header::X_CONTENT_TYPE_OPTIONS).unwrap(), "nosniff");
    assert!(resp.headers().get(header::CONTENT_DISPOSITION).is_none());
}

#[actix_web::test]
async fn test_delete_file_material_removes_file() {
    let ctx = TestContext::new().await;
    let app = init_app!(ctx);

    let (teacher, _) = register!(app, "teacher", "Teacher", "t@example.com");
    let (_, json) = call_json!(
        app,
        TestRequest::post()
            .uri("/api/courses")
            .insert_header(bearer(&teacher))
            .set_json(json!({"title": "Graphics", "code": "GFX1"}))
    );
    let course_id = json["data"]["id"].as_i64().unwrap();

    let body = multipart_body(
        &[("title", "Shaders"), ("courseId", &course_id.to_string())],
        Some(("notes.txt", "text/plain", b"vertex and fragment".as_slice())),
    );
    let (_, json) = call_json!(
        app,
        TestRequest::post()
            .uri("/api/materials")
            .insert_header(bearer(&teacher))
            .insert_header(multipart_content_type())
            .set_payload(body)
    );
    let material_id = json["data"]["id"].as_i64().unwrap();
    let file_url = json["data"]["fileUrl"].as_str().unwrap().to_string();
    let path = ctx.upload_path(&file_url);
    assert!(path.exists());

    let (status, _) = call_json!(
        app,
        TestRequest::delete()
            .uri(&format!("/api/materials/{material_id}"))
            .insert_header(bearer(&teacher))
    );
    assert_eq!(status, StatusCode::OK);
    assert!(!path.exists());

    let resp = test::call_service(&app, TestRequest::get().uri(&file_url).to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_course_delete_cascades() {
    let ctx = TestContext::new().await;
    let app = init_app!(ctx);

    let (teacher, _) = register!(app, "teacher", "Teacher", "t@example.com");
    let (student, student_id) = register!(app, "student", "Student", "s@example.com");

    let (_, json) = call_json!(
        app,
        TestRequest::post()
            .uri("/api/courses")
            .insert_header(bearer(&teacher))
            .set_json(json!({"title": "Security", "code": "SEC1"}))
    );
    let course_id = json["data"]["id"].as_i64().unwrap();

    call_json!(
        app,
        TestRequest::post()
            .uri(&format!("/api/courses/{course_id}/enroll"))
            .insert_header(bearer(&student))
    );

    let body = multipart_body(
        &[("title", "Threat model"), ("courseId", &course_id.to_string())],
        Some(("threats.md", "text/markdown", b"# STRIDE".as_slice())),
    );
    let (_, json) = call_json!(
        app,
        TestRequest::post()
            .uri("/api/materials")
            .insert_header(bearer(&teacher))
            .insert_header(multipart_content_type())
            .set_payload(body)
    );
    let material_id = json["data"]["id"].as_i64().unwrap();
    let path = ctx.upload_path(json["data"]["fileUrl"].as_str().unwrap());
    assert!(path.exists());

    let (status, json) = call_json!(
        app,
        TestRequest::delete()
            .uri(&format!("/api/courses/{course_id}"))
            .insert_header(bearer(&teacher))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Course deleted successfully");
    assert!(!path.exists());

    let (status, _) = call_json!(
        app,
        TestRequest::get()
            .uri(&format!("/api/materials/{material_id}"))
            .insert_header(bearer(&teacher))
    );
    assert_eq!(status, StatusCode::NOT_FOUND);

    // 选课记录一并删除
    assert!(!ctx.storage.is_enrolled(course_id, student_id).await.unwrap());
    let (_, json) = call_json!(
        app,
        TestRequest::get()
            .uri("/api/courses")
            .insert_header(bearer(&student))
    );
    assert_eq!(json["count"], 0);
}

#[actix_web::test]
async fn test_oversized_upload_rejected() {
    let ctx = TestContext::with_max_upload(16).await;
    let app = init_app!(ctx);

    let (teacher, _) = register!(app, "teacher", "Teacher", "t@example.com");
    let (_, json) = call_json!(
        app,
        TestRequest::post()
            .uri("/api/courses")
            .insert_header(bearer(&teacher))
            .set_json(json!({"title": "Big Data", "code": "BD1"}))
    );
    let course_id = json["data"]["id"].as_i64().unwrap();

    let body = multipart_body(
        &[("title", "Dataset"), ("courseId", &course_id.to_string())],
        Some(("data.csv", "text/csv", [b'x'; 64].as_slice())),
    );
    let (status, json) = call_json!(
        app,
        TestRequest::post()
            .uri("/api/materials")
            .insert_header(bearer(&teacher))
            .insert_header(multipart_content_type())
            .set_payload(body)
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "ValidationError");
    assert_eq!(ctx.stored_file_count(), 0);
}

#[actix_web::test]
async fn test_rejected_upload_is_discarded() {
    let ctx = TestContext::new().await;
    let app = init_app!(ctx);

    let (owner, _) = register!(app, "teacher", "Owner", "owner@example.com");
    let (other, _) = register!(app, "teacher", "Other", "other@example.com");
    let (_, json) = call_json!(
        app,
        TestRequest::post()
            .uri("/api/courses")
            .insert_header(bearer(&owner))
            .set_json(json!({"title": "Robotics", "code": "ROB1"}))
    );
    let course_id = json["data"]["id"].as_i64().unwrap();

    let body = multipart_body(
        &[("title", "Kinematics"), ("courseId", &course_id.to_string())],
        Some(("kinematics.pdf", "application/pdf", b"%PDF".as_slice())),
    );
    let (status, _) = call_json!(
        app,
        TestRequest::post()
            .uri("/api/materials")
            .insert_header(bearer(&other))
            .insert_header(multipart_content_type())
            .set_payload(body)
    );
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(ctx.stored_file_count(), 0);
}

#[actix_web::test]
async fn test_upload_path_traversal_rejected() {
    let ctx = TestContext::new().await;
    let app = init_app!(ctx);

    let resp = test::call_service(
        &app,
        TestRequest::get()
            .uri("/uploads/materials/..%2Flms.db")
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_seeded_sample_course() {
    let ctx = TestContext::new().await;
    rust_lms::runtime::lifetime::startup::seed_sample_data(&ctx.storage)
        .await
        .unwrap();
    // 重复执行不会产生重复数据
    rust_lms::runtime::lifetime::startup::seed_sample_data(&ctx.storage)
        .await
        .unwrap();
    let app = init_app!(ctx);

    let (status, json) = call_json!(
        app,
        TestRequest::post().uri("/api/auth/login").set_json(json!({
            "email": "student@example.com",
            "password": "student123",
            "role": "student"
        }))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["user"]["studentId"], "STU001");
    let student = json["token"].as_str().unwrap().to_string();

    let (_, json) = call_json!(
        app,
        TestRequest::get()
            .uri("/api/courses/available")
            .insert_header(bearer(&student))
    );
    assert_eq!(json["count"], 1);
    assert_eq!(json["data"][0]["code"], "CS101");
    assert_eq!(json["data"][0]["teacher"]["name"], "Dr. Jane Teacher");
    let course_id = json["data"][0]["id"].as_i64().unwrap();

    call_json!(
        app,
        TestRequest::post()
            .uri(&format!("/api/courses/{course_id}/enroll"))
            .insert_header(bearer(&student))
    );

    let (status, json) = call_json!(
        app,
        TestRequest::get()
            .uri(&format!("/api/materials/course/{course_id}"))
            .insert_header(bearer(&student))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["count"], 1);
    assert_eq!(json["data"][0]["title"], "Course Syllabus");
    assert_eq!(json["data"][0]["materialType"], "text");
}
