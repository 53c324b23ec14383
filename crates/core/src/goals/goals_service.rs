use std::sync::Arc;

use crate::errors::{Error, Result};
use crate::goals::goals_model::{Goal, GoalUpdate, NewGoal};
use crate::goals::goals_traits::{GoalRepositoryTrait, GoalServiceTrait};

pub struct GoalService {
    goal_repo: Arc<dyn GoalRepositoryTrait>,
}

impl GoalService {
    pub fn new(goal_repo: Arc<dyn GoalRepositoryTrait>) -> Self {
        GoalService { goal_repo }
    }
}

#[async_trait::async_trait]
impl GoalServiceTrait for GoalService {
    fn get_goals(&self, user_id: &str) -> Result<Vec<Goal>> {
        self.goal_repo.load_goals(user_id)
    }

    async fn create_goal(&self, user_id: &str, new_goal: NewGoal) -> Result<Goal> {
        new_goal.validate()?;
        self.goal_repo.insert_new_goal(user_id, new_goal).await
    }

    async fn update_goal(&self, user_id: &str, goal_update: GoalUpdate) -> Result<Goal> {
        goal_update.validate()?;
        self.goal_repo.update_goal(user_id, goal_update).await
    }

    async fn delete_goal(&self, user_id: &str, goal_id: &str) -> Result<()> {
        if self.goal_repo.delete_goal(user_id, goal_id).await? == 0 {
            return Err(Error::not_found("Goal"));
        }
        Ok(())
    }
}
