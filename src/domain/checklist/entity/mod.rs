pub mod checklist_item;
pub mod checklist_master;
pub mod user_checklist_response;
