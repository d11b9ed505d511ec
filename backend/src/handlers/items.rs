//! HTTP handlers for item and item-group endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::item::{
    AddVariantInput, CreateGroupInput, CreateItemInput, ItemService, UpdateItemInput,
};
use crate::AppState;
use shared::models::{Item, ItemGroup};

/// Create a standalone item
pub async fn create_item(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Json(input): Json<CreateItemInput>,
) -> AppResult<Json<Item>> {
    let service = ItemService::new(state.db);
    let item = service.create_item(input).await?;
    Ok(Json(item))
}

/// Get an item by id
pub async fn get_item(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(item_id): Path<Uuid>,
) -> AppResult<Json<Item>> {
    let service = ItemService::new(state.db);
    let item = service.get_item(item_id).await?;
    Ok(Json(item))
}

/// List items
pub async fn list_items(
    State(state): State<AppState>,
    _current_user: CurrentUser,
) -> AppResult<Json<Vec<Item>>> {
    let service = ItemService::new(state.db);
    let items = service.list_items().await?;
    Ok(Json(items))
}

/// Update an item's descriptive fields
pub async fn update_item(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(item_id): Path<Uuid>,
    Json(input): Json<UpdateItemInput>,
) -> AppResult<Json<Item>> {
    let service = ItemService::new(state.db);
    let item = service.update_item(item_id, input).await?;
    Ok(Json(item))
}

/// Delete a standalone item
pub async fn delete_item(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(item_id): Path<Uuid>,
) -> AppResult<Json<()>> {
    let service = ItemService::new(state.db);
    service.delete_item(item_id).await?;
    Ok(Json(()))
}

/// Create an item group
pub async fn create_group(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Json(input): Json<CreateGroupInput>,
) -> AppResult<Json<ItemGroup>> {
    let service = ItemService::new(state.db);
    let group = service.create_group(input).await?;
    Ok(Json(group))
}

/// Get a group by id
pub async fn get_group(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(group_id): Path<Uuid>,
) -> AppResult<Json<ItemGroup>> {
    let service = ItemService::new(state.db);
    let group = service.get_group(group_id).await?;
    Ok(Json(group))
}

/// List groups
pub async fn list_groups(
    State(state): State<AppState>,
    _current_user: CurrentUser,
) -> AppResult<Json<Vec<ItemGroup>>> {
    let service = ItemService::new(state.db);
    let groups = service.list_groups().await?;
    Ok(Json(groups))
}

/// Add a variant to a group
pub async fn add_variant(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(group_id): Path<Uuid>,
    Json(input): Json<AddVariantInput>,
) -> AppResult<Json<ItemGroup>> {
    let service = ItemService::new(state.db);
    let group = service.add_variant(group_id, input).await?;
    Ok(Json(group))
}

/// Move a standalone item into a group
pub async fn move_item_to_group(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path((item_id, group_id)): Path<(Uuid, Uuid)>,
) -> AppResult<Json<ItemGroup>> {
    let service = ItemService::new(state.db);
    let group = service.move_item_to_group(item_id, group_id).await?;
    Ok(Json(group))
}

/// Extract a variant from a group back into a standalone item
pub async fn extract_variant(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path((group_id, variant_id)): Path<(Uuid, Uuid)>,
) -> AppResult<Json<Item>> {
    let service = ItemService::new(state.db);
    let item = service.extract_variant(group_id, variant_id).await?;
    Ok(Json(item))
}

/// Delete an empty group
pub async fn delete_group(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(group_id): Path<Uuid>,
) -> AppResult<Json<()>> {
    let service = ItemService::new(state.db);
    service.delete_group(group_id).await?;
    Ok(Json(()))
}
