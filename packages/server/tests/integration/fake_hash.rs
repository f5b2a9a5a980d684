use registrar_server::entity::{file_name_hash, video_local, video_local_place};
use sea_orm::EntityTrait;
use serde_json::{Value, json};

use crate::common::{TestApp, routes};

const ED2K: &str = "0123456789abcdef0123456789abcdef";
const OTHER_ED2K: &str = "ffeeddccbbaa99887766554433221100";

fn hashes(ed2k: &str) -> Value {
    json!({
        "ed2k": ed2k,
        "crc32": "89abcdef",
        "md5": "fedcba9876543210fedcba9876543210",
        "sha1": "0123456789abcdef0123456789abcdef01234567",
    })
}

fn by_path(folder_id: i32, path: &str, ed2k: &str) -> Value {
    json!({
        "importFolderID": folder_id,
        "filePath": path,
        "fileSize": 104857600,
        "hashes": hashes(ed2k),
    })
}

mod registration {
    use super::*;

    #[tokio::test]
    async fn new_file_is_created_from_folder_and_path() {
        let app = TestApp::spawn().await;
        let folder = app.create_import_folder("anime").await;

        let res = app
            .post_json(routes::FAKE_HASH, &by_path(folder, "Show/ep01.mkv", ED2K))
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body, json!({"fileID": 1, "fileLocationID": 1}));

        let file = video_local::Entity::find_by_id(1)
            .one(&app.db)
            .await
            .unwrap()
            .expect("file row should exist");
        assert_eq!(file.file_name, "ep01.mkv");
        assert_eq!(file.ed2k, ED2K.to_uppercase());
        assert_eq!(file.file_size, 104_857_600);
        assert_eq!(file.hash_source, 1);

        let place = video_local_place::Entity::find_by_id(1)
            .one(&app.db)
            .await
            .unwrap()
            .expect("place row should exist");
        assert_eq!(place.video_local_id, 1);
        assert_eq!(place.file_path, "Show/ep01.mkv");
        assert_eq!(place.import_folder_type, Some(1));

        let entries = file_name_hash::Entity::find().all(&app.db).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].hash, ED2K.to_uppercase());
    }

    #[tokio::test]
    async fn registering_the_same_path_twice_updates_in_place() {
        let app = TestApp::spawn().await;
        let folder = app.create_import_folder("anime").await;

        let first = app
            .post_json(routes::FAKE_HASH, &by_path(folder, "Show/ep01.mkv", ED2K))
            .await;
        assert_eq!(first.status, 200, "{}", first.text);

        let second = app
            .post_json(
                routes::FAKE_HASH,
                &by_path(folder, "Show/ep01.mkv", OTHER_ED2K),
            )
            .await;
        assert_eq!(second.status, 200, "{}", second.text);
        assert_eq!(second.file_id(), first.file_id());
        assert_eq!(second.file_location_id(), first.file_location_id());

        let files = video_local::Entity::find().all(&app.db).await.unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].ed2k, OTHER_ED2K.to_uppercase());
        assert_eq!(
            video_local_place::Entity::find().all(&app.db).await.unwrap().len(),
            1
        );

        let entries = file_name_hash::Entity::find().all(&app.db).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].hash, OTHER_ED2K.to_uppercase());
    }

    #[tokio::test]
    async fn absolute_path_inside_the_folder_is_accepted() {
        let app = TestApp::spawn().await;
        let folder = app.create_import_folder("anime").await;
        let absolute = app.media_root.path().join("Show").join("ep02.mkv");

        let res = app
            .post_json(
                routes::FAKE_HASH,
                &by_path(folder, &absolute.to_string_lossy(), ED2K),
            )
            .await;
        assert_eq!(res.status, 200, "{}", res.text);

        let place = video_local_place::Entity::find_by_id(res.file_location_id())
            .one(&app.db)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(place.file_path, "Show/ep02.mkv");
    }

    #[tokio::test]
    async fn file_id_alone_reuses_its_location() {
        let app = TestApp::spawn().await;
        let folder = app.create_import_folder("anime").await;
        app.touch("Show/ep01.mkv");

        let created = app
            .post_json(routes::FAKE_HASH, &by_path(folder, "Show/ep01.mkv", ED2K))
            .await;
        assert_eq!(created.status, 200, "{}", created.text);

        let res = app
            .post_json(
                routes::FAKE_HASH,
                &json!({
                    "fileID": created.file_id(),
                    "fileSize": 104857600,
                    "hashes": hashes(OTHER_ED2K),
                    "hashSource": "FileNameCache",
                }),
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.file_location_id(), created.file_location_id());

        let file = video_local::Entity::find_by_id(created.file_id())
            .one(&app.db)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(file.ed2k, OTHER_ED2K.to_uppercase());
        assert_eq!(file.hash_source, 2);
    }
}

mod errors {
    use super::*;

    #[tokio::test]
    async fn unknown_file_id_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app
            .post_json(
                routes::FAKE_HASH,
                &json!({"fileID": 999, "fileSize": 10, "hashes": hashes(ED2K)}),
            )
            .await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
        assert_eq!(res.body["field"], "fileID");
    }

    #[tokio::test]
    async fn unknown_import_folder_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app
            .post_json(routes::FAKE_HASH, &by_path(42, "Show/ep01.mkv", ED2K))
            .await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
        assert_eq!(res.body["field"], "importFolderID");
    }

    #[tokio::test]
    async fn path_outside_the_folder_is_rejected() {
        let app = TestApp::spawn().await;
        let folder = app.create_import_folder("anime").await;

        let res = app
            .post_json(routes::FAKE_HASH, &by_path(folder, "../../etc/passwd", ED2K))
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
        assert_eq!(res.body["field"], "filePath");
        assert!(
            video_local::Entity::find()
                .all(&app.db)
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn missing_identifiers_are_rejected_without_a_field() {
        let app = TestApp::spawn().await;

        let res = app
            .post_json(
                routes::FAKE_HASH,
                &json!({"filePath": "Show/ep01.mkv", "fileSize": 10, "hashes": hashes(ED2K)}),
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
        assert_eq!(
            res.body["message"],
            "Provide either fileID or importFolderID + filePath."
        );
        assert!(res.body.get("field").is_none());
    }

    #[tokio::test]
    async fn malformed_hash_names_the_hash_field() {
        let app = TestApp::spawn().await;
        let folder = app.create_import_folder("anime").await;
        let mut body = by_path(folder, "Show/ep01.mkv", ED2K);
        body["hashes"]["crc32"] = json!("1234567");

        let res = app.post_json(routes::FAKE_HASH, &body).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["field"], "hashes.crc32");
    }

    #[tokio::test]
    async fn file_id_contradicting_the_linked_file_is_rejected() {
        let app = TestApp::spawn().await;
        let folder = app.create_import_folder("anime").await;

        let first = app
            .post_json(routes::FAKE_HASH, &by_path(folder, "Show/ep01.mkv", ED2K))
            .await;
        assert_eq!(first.status, 200, "{}", first.text);

        // A second file with no location of its own.
        let bare = app
            .post_json(routes::FAKE_HASH, &by_path(folder, "Show/ep02.mkv", ED2K))
            .await;
        assert_eq!(bare.status, 200, "{}", bare.text);
        video_local_place::Entity::delete_by_id(bare.file_location_id())
            .exec(&app.db)
            .await
            .unwrap();

        let mut body = by_path(folder, "Show/ep01.mkv", OTHER_ED2K);
        body["fileID"] = json!(bare.file_id());
        let res = app.post_json(routes::FAKE_HASH, &body).await;

        assert_eq!(res.status, 400, "{}", res.text);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
        assert_eq!(res.body["field"], "fileID");
    }

    #[tokio::test]
    async fn malformed_json_is_a_validation_error() {
        let app = TestApp::spawn().await;

        let res = app.post_raw(routes::FAKE_HASH, "{not json").await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
        let message = res.body["message"].as_str().unwrap();
        assert!(message.starts_with("Request body is not valid JSON"), "{message}");
    }

    #[tokio::test]
    async fn wrongly_typed_body_is_a_validation_error() {
        let app = TestApp::spawn().await;

        let res = app
            .post_json(
                routes::FAKE_HASH,
                &json!({"fileID": 1, "fileSize": "big", "hashes": hashes(ED2K)}),
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
        let message = res.body["message"].as_str().unwrap();
        assert!(message.starts_with("Request body has the wrong shape"), "{message}");
    }
}

#[tokio::test]
async fn openapi_document_lists_the_endpoint() {
    let app = TestApp::spawn().await;

    let res = app.get(routes::OPENAPI).await;

    assert_eq!(res.status, 200);
    assert!(res.body["paths"]["/api/v1/fake-hash"]["post"].is_object());
}
