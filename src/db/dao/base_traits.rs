pub trait HasIdColumn: sea_orm::EntityTrait {
    fn id_column() -> Self::Column;
}

pub trait HasIdActiveModel {
    fn set_id(&mut self, id: i64);
}
