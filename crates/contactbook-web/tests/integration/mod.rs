mod delete_contact;
mod failures;
mod pages;
