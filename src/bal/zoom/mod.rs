pub mod meeting_provisioner;
pub mod password;
