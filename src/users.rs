//! Operações de usuários

use crate::client::{path_segment, require_id, AsanaClient};
use crate::error::Result;
use crate::pagination::{PageStream, PaginationRequest, Paginator};
use crate::types::{User, UserId};

impl AsanaClient {
    /// Busca um usuário; [`UserId::me`] devolve o dono do token
    pub async fn get_user(&self, id: &UserId) -> Result<User> {
        self.get_data(&format!("/users/{}", path_segment(id.as_str()))).await
    }

    /// Lista os usuários de uma organização/workspace
    pub fn list_all_users_in_organization(&self, workspace_id: &str) -> Result<PageStream<User>> {
        let workspace_id = require_id(workspace_id, "workspaceID")?;
        let start = PaginationRequest::with_query(
            "/users?opt_fields=id,gid,name,email",
            &[("workspace".to_string(), workspace_id)],
        );
        Paginator::new(self.clone(), "users", start).start()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{page_body, ScriptedTransport};
    use reqwest::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn test_get_me() {
        let transport = ScriptedTransport::new();
        transport.push_json(StatusCode::OK, r#"{"data": {"gid": "1", "name": "Ana", "email": "ana@example.com"}}"#);

        let client = AsanaClient::new(&["t"]).unwrap();
        client.set_transport(transport.clone());

        let user = client.get_user(&UserId::me()).await.unwrap();
        assert_eq!(user.email.as_deref(), Some("ana@example.com"));
        assert_eq!(transport.requests()[0].url, "https://app.asana.com/api/1.0/users/me");
    }

    #[tokio::test]
    async fn test_users_in_organization() {
        let transport = ScriptedTransport::new();
        transport.push_json(
            StatusCode::OK,
            &page_body(json!([{"id": 1, "email": "a@x.io"}, {"id": 2, "email": "b@x.io"}]), None),
        );

        let client = AsanaClient::new(&["t"]).unwrap();
        client.set_transport(transport.clone());

        let mut stream = client.list_all_users_in_organization("ws-9").unwrap();
        let page = stream.recv().await.unwrap();
        assert_eq!(page.len(), 2);
        assert!(stream.recv().await.is_none());

        assert_eq!(
            transport.requests()[0].url,
            "https://app.asana.com/api/1.0/users?opt_fields=id,gid,name,email&workspace=ws-9"
        );
        assert!(client.list_all_users_in_organization(" ").unwrap_err().is_validation());
    }
}
