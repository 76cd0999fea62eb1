pub mod editable_label;
pub mod export_buttons;
pub mod header;
pub mod image_grid;
pub mod info_section;
pub mod pagination;
pub mod visit_table;
