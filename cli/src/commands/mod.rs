mod category;
mod helpers;
mod list;
mod product;
mod recipe;
mod shop;
mod transfer;

pub(crate) use category::cmd_category_add;
pub(crate) use list::cmd_list;
pub(crate) use product::{
    cmd_product_add, cmd_product_check, cmd_product_optional, cmd_product_quantity,
    cmd_product_remove, cmd_product_rename, cmd_product_shop, cmd_product_unit,
};
pub(crate) use recipe::{
    cmd_recipe_add, cmd_recipe_add_product, cmd_recipe_import, cmd_recipe_list, cmd_recipe_show,
};
pub(crate) use shop::{cmd_shop_add, cmd_shop_list};
pub(crate) use transfer::{cmd_export, cmd_import};
