//! 仓库层集成测试（需要 PostgreSQL，设置 TEST_DATABASE_URL 后用 --ignored 运行）

use auth_sync::{
    events::EventBus,
    models::group::UpdateGroupRequest,
    repository::{
        GroupRepository, GroupStore, RoleRepository, RoleStore, ShopRepository, ShopStore,
    },
    services::{GroupCreationReconciler, GroupService, RoleSyncService, TenantInheritanceResolver},
};
use serial_test::serial;
use std::sync::Arc;

mod common;
use common::{
    create_shop, create_test_config, group_request, set_primary_shop, setup_test_db, strings,
};

#[tokio::test]
#[ignore] // 需要数据库
#[serial]
async fn test_role_insert_if_absent() {
    let pool = setup_test_db(&create_test_config()).await;
    let repo = RoleRepository::new(pool);

    assert!(repo.insert_role_if_absent("orders:read").await.unwrap());
    assert!(!repo.insert_role_if_absent("orders:read").await.unwrap());

    let found = repo.find_role("orders:read").await.unwrap();
    assert_eq!(found.map(|r| r.name), Some("orders:read".to_string()));
    assert_eq!(repo.list_roles().await.unwrap().len(), 1);
}

#[tokio::test]
#[ignore] // 需要数据库
#[serial]
async fn test_concurrent_role_sync_unique() {
    let pool = setup_test_db(&create_test_config()).await;
    let role_sync = Arc::new(RoleSyncService::new(Arc::new(RoleRepository::new(pool.clone()))));
    let ids = strings(&["p1", "p2", "p3", "p4", "p5"]);

    let mut tasks = Vec::new();
    for _ in 0..4 {
        let role_sync = role_sync.clone();
        let ids = ids.clone();
        tasks.push(tokio::spawn(async move { role_sync.ensure_roles(&ids).await }));
    }

    let mut inserted = 0;
    for task in tasks {
        inserted += task.await.unwrap().unwrap();
    }

    assert_eq!(inserted, 5);
    assert_eq!(RoleRepository::new(pool).list_roles().await.unwrap().len(), 5);
}

#[tokio::test]
#[ignore] // 需要数据库
#[serial]
async fn test_primary_shop_switch() {
    let pool = setup_test_db(&create_test_config()).await;
    let repo = ShopRepository::new(pool.clone());

    assert_eq!(repo.primary_shop_id().await.unwrap(), None);

    let first = create_shop(&pool, "first").await;
    let second = create_shop(&pool, "second").await;
    assert_eq!(repo.primary_shop_id().await.unwrap(), None);

    set_primary_shop(&pool, first.id).await;
    assert_eq!(repo.primary_shop_id().await.unwrap(), Some(first.id));

    set_primary_shop(&pool, second.id).await;
    assert_eq!(repo.primary_shop_id().await.unwrap(), Some(second.id));
}

#[tokio::test]
#[ignore] // 需要数据库
#[serial]
async fn test_group_lookup_and_scoped_update() {
    let pool = setup_test_db(&create_test_config()).await;
    let shop = create_shop(&pool, "shop").await;
    let repo = GroupRepository::new(pool);

    let group = repo
        .insert_group(&group_request("owner", Some(shop.id), &[]))
        .await
        .unwrap();

    let found = repo
        .find_group_by_slug(Some(shop.id), "owner")
        .await
        .unwrap()
        .expect("Group not found");
    assert_eq!(found.id, group.id);
    assert!(repo.find_group_by_slug(None, "owner").await.unwrap().is_none());

    let req = UpdateGroupRequest::permissions(strings(&["b", "a"]));
    assert!(repo.update_group(group.id, None, &req).await.unwrap().is_none());

    let updated = repo
        .update_group(group.id, Some(shop.id), &req)
        .await
        .unwrap()
        .expect("Group not updated");
    assert_eq!(updated.permissions, strings(&["b", "a"]));
    assert_eq!(updated.name, "owner");
}

#[tokio::test]
#[ignore] // 需要数据库
#[serial]
async fn test_duplicate_slug_rejected() {
    let pool = setup_test_db(&create_test_config()).await;
    let repo = GroupRepository::new(pool);

    repo.insert_group(&group_request("accounts-manager", None, &[]))
        .await
        .unwrap();
    let err = repo
        .insert_group(&group_request("accounts-manager", None, &[]))
        .await
        .unwrap_err();

    assert_eq!(err.code(), 400);
}

#[tokio::test]
#[ignore] // 需要数据库
#[serial]
async fn test_rename_onto_existing_slug_is_bad_request() {
    let pool = setup_test_db(&create_test_config()).await;
    let repo = GroupRepository::new(pool);

    repo.insert_group(&group_request("owner", None, &[]))
        .await
        .unwrap();
    let other = repo
        .insert_group(&group_request("shop manager", None, &[]))
        .await
        .unwrap();

    let rename = UpdateGroupRequest {
        slug: Some("owner".to_string()),
        ..Default::default()
    };
    let err = repo.update_group(other.id, None, &rename).await.unwrap_err();

    assert_eq!(err.code(), 400);
}

#[tokio::test]
#[ignore] // 需要数据库
#[serial]
async fn test_inheritance_against_postgres() {
    let pool = setup_test_db(&create_test_config()).await;
    let shops = Arc::new(ShopRepository::new(pool.clone()));
    let groups = Arc::new(GroupRepository::new(pool.clone()));
    let roles = Arc::new(RoleRepository::new(pool.clone()));

    let primary = create_shop(&pool, "primary").await;
    set_primary_shop(&pool, primary.id).await;
    let other = create_shop(&pool, "other").await;

    groups
        .insert_group(&group_request("owner", Some(primary.id), &["p1", "p2"]))
        .await
        .unwrap();
    let group = groups
        .insert_group(&group_request("owner", Some(other.id), &[]))
        .await
        .unwrap();

    let role_sync = Arc::new(RoleSyncService::new(roles.clone()));
    let reconciler = GroupCreationReconciler::new(
        Arc::new(TenantInheritanceResolver::new(shops, groups.clone())),
        Arc::new(GroupService::new(groups.clone(), Arc::new(EventBus::new()))),
        role_sync,
    );
    reconciler.handle(&group).await.unwrap();

    let stored = groups.find_group(group.id).await.unwrap().unwrap();
    assert_eq!(stored.permissions, strings(&["p1", "p2"]));

    let registered: Vec<String> = roles.list_roles().await.unwrap().into_iter().map(|r| r.name).collect();
    assert_eq!(registered, strings(&["p1", "p2"]));
}
