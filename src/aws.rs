use crate::error::{ClientInitError, ListError};
use crate::models::Instance;
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_ec2::error::{DisplayErrorContext, ProvideErrorMetadata};
use aws_sdk_ec2::Client as Ec2Client;
use aws_sdk_sts::Client as StsClient;
use std::fmt;
use std::sync::Arc;

pub type ClientHandle = Arc<dyn ResourceClient>;

/// Snapshot of the configuration needed to build a client.
#[derive(Clone, Debug, PartialEq)]
pub struct ClientSettings {
    pub region: String,
    pub profile: Option<String>,
}

/// A connected client able to enumerate compute instances in one region.
#[async_trait]
pub trait ResourceClient: Send + Sync + fmt::Debug {
    async fn list_instances(&self) -> Result<Vec<Instance>, ListError>;

    fn region(&self) -> &str;

    /// Account the credentials belong to, when known.
    fn account(&self) -> Option<&str> {
        None
    }
}

/// Builds clients; one call per (re)connect.
#[async_trait]
pub trait ClientConnector: Send + Sync {
    async fn connect(&self, settings: ClientSettings) -> Result<ClientHandle, ClientInitError>;
}

#[derive(Debug, Default)]
pub struct AwsConnector;

#[async_trait]
impl ClientConnector for AwsConnector {
    async fn connect(&self, settings: ClientSettings) -> Result<ClientHandle, ClientInitError> {
        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(aws_config::Region::new(settings.region.clone()));
        if let Some(profile) = &settings.profile {
            loader = loader.profile_name(profile);
        }
        let config = loader.load().await;

        // aws-config resolves credentials lazily, so ask STS who we are to
        // surface bad credentials before the first listing.
        let identity = StsClient::new(&config)
            .get_caller_identity()
            .send()
            .await
            .map_err(|e| match e.as_service_error() {
                Some(service_err) => ClientInitError::Rejected {
                    region: settings.region.clone(),
                    code: service_err.code().unwrap_or("Unknown").to_string(),
                    message: service_err.message().unwrap_or_default().to_string(),
                },
                None => ClientInitError::Unavailable {
                    region: settings.region.clone(),
                    message: aws_sdk_sts::error::DisplayErrorContext(&e).to_string(),
                },
            })?;

        tracing::info!(
            "Connected to {} as {}",
            settings.region,
            identity.arn().unwrap_or("unknown identity")
        );

        Ok(Arc::new(AwsClient {
            client: Ec2Client::new(&config),
            region: settings.region,
            account: identity.account().map(str::to_string),
        }))
    }
}

#[derive(Debug)]
pub struct AwsClient {
    client: Ec2Client,
    region: String,
    account: Option<String>,
}

#[async_trait]
impl ResourceClient for AwsClient {
    async fn list_instances(&self) -> Result<Vec<Instance>, ListError> {
        let resp = self
            .client
            .describe_instances()
            .send()
            .await
            .map_err(|e| match e.as_service_error() {
                Some(service_err) => ListError::Service {
                    code: service_err.code().unwrap_or("Unknown").to_string(),
                    message: service_err.message().unwrap_or_default().to_string(),
                },
                None => ListError::Transport(DisplayErrorContext(&e).to_string()),
            })?;

        if resp.next_token().is_some() {
            tracing::warn!("DescribeInstances returned more pages; only the first is shown");
        }

        Ok(resp
            .reservations()
            .iter()
            .flat_map(|reservation| reservation.instances())
            .map(instance_from_sdk)
            .collect())
    }

    fn region(&self) -> &str {
        &self.region
    }

    fn account(&self) -> Option<&str> {
        self.account.as_deref()
    }
}

fn instance_from_sdk(instance: &aws_sdk_ec2::types::Instance) -> Instance {
    let tags: Vec<(String, String)> = instance
        .tags()
        .iter()
        .filter_map(|tag| match (tag.key(), tag.value()) {
            (Some(key), Some(value)) => Some((key.to_string(), value.to_string())),
            _ => None,
        })
        .collect();

    let name = tags
        .iter()
        .find(|(key, _)| key == "Name")
        .map(|(_, value)| value.clone())
        .filter(|value| !value.is_empty());

    Instance {
        id: instance.instance_id().unwrap_or("N/A").to_string(),
        name,
        state: instance
            .state()
            .and_then(|s| s.name())
            .map(|s| s.as_str().to_string())
            .unwrap_or_else(|| "unknown".to_string()),
        instance_type: instance
            .instance_type()
            .map(|t| t.as_str().to_string())
            .unwrap_or_else(|| "N/A".to_string()),
        public_ip: instance.public_ip_address().map(str::to_string),
        private_ip: instance.private_ip_address().map(str::to_string),
        tags,
    }
}
