//! Operações de times

use reqwest::Method;

use crate::client::{path_segment, require_id, AsanaClient};
use crate::codec;
use crate::error::Result;
use crate::pagination::{PageStream, PaginationRequest, Paginator};
use crate::types::{Team, TeamRequest, User};

impl AsanaClient {
    pub async fn find_team_by_id(&self, team_id: &str) -> Result<Team> {
        let team_id = require_id(team_id, "teamID")?;
        self.get_data(&format!("/teams/{}", path_segment(&team_id))).await
    }

    /// Adiciona um usuário ao time (`POST /teams/{id}/addUser`)
    pub async fn add_user_to_team(&self, request: &TeamRequest) -> Result<Team> {
        let (team_id, user_id) = request.validate()?;
        let path = format!("/teams/{}/addUser", path_segment(&team_id));
        let body = self
            .send_form(Method::POST, &path, &[("user".to_string(), user_id)])
            .await?;
        codec::decode_data(&body)
    }

    pub async fn remove_user_from_team(&self, request: &TeamRequest) -> Result<()> {
        let (team_id, user_id) = request.validate()?;
        let path = format!("/teams/{}/removeUser", path_segment(&team_id));
        self.send_form(Method::POST, &path, &[("user".to_string(), user_id)])
            .await?;
        Ok(())
    }

    pub fn list_all_teams_in_organization(&self, organization_id: &str) -> Result<PageStream<Team>> {
        let organization_id = require_id(organization_id, "organizationID")?;
        let start = PaginationRequest::new(format!(
            "/organizations/{}/teams?opt_fields=html_description,name,id",
            path_segment(&organization_id)
        ));
        Paginator::new(self.clone(), "teams", start).start()
    }

    /// Times de um usuário, opcionalmente filtrados por organização
    pub fn list_all_teams_for_user(&self, request: &TeamRequest) -> Result<PageStream<Team>> {
        let user_id = request.require_user()?;
        let start = PaginationRequest::with_query(
            &format!("/users/{}/teams", path_segment(&user_id)),
            &request.query()?,
        );
        Paginator::new(self.clone(), "teams", start).start()
    }

    pub fn list_all_users_in_team(&self, team_id: &str) -> Result<PageStream<User>> {
        let team_id = require_id(team_id, "teamID")?;
        let start = PaginationRequest::new(format!("/teams/{}/users", path_segment(&team_id)));
        Paginator::new(self.clone(), "users", start).start()
    }
}
