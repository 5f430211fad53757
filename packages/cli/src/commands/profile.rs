use std::path::PathBuf;

use anyhow::Result;
use common::models::{
    BiographyForm, MediaChannel, ProfessionalInfoForm, ProfileBasicInfoForm, Region,
};
use futures::try_join;
use portal::wizards::{ProfileData, ProfileInput, ProfileStep, ProfileWizard};

use crate::commands::apply::options;
use crate::commands::drive;
use crate::context::Context;
use crate::{output, prompt};

pub async fn run(ctx: &Context) -> Result<()> {
    let client = ctx.guard("/profile/setup")?;
    let (regions, channels) = try_join!(
        options::<Region>(&client),
        options::<MediaChannel>(&client),
    )?;
    let mut flow = ProfileWizard::resume(client).await?;
    if flow.is_complete() {
        output::info("Your profile is complete. Walking through it again to update.");
        flow.go_to(ProfileStep::BasicInfo)?;
    }

    if drive(&mut flow, |step, data| ask(step, data, &regions, &channels)).await? {
        output::success("Profile complete");
    }
    Ok(())
}

fn ask(
    step: ProfileStep,
    data: &ProfileData,
    regions: &[(String, String)],
    channels: &[(String, String)],
) -> Result<ProfileInput> {
    Ok(match step {
        ProfileStep::BasicInfo => {
            let basic = &data.basic;
            let avatar = prompt::optional("Profile photo (path, blank to keep)", None)?;
            ProfileInput::BasicInfo(ProfileBasicInfoForm {
                first_name: prompt::text("First name", &basic.first_name)?,
                last_name: prompt::text("Last name", &basic.last_name)?,
                phone_number: prompt::text("Phone number", &basic.phone_number)?,
                gender: prompt::optional("Gender", basic.gender.as_deref())?,
                region_uuid: prompt::choose("Region", regions, &basic.region_uuid)?,
                avatar: avatar.map(PathBuf::from),
            })
        }
        ProfileStep::ProfessionalInfo => {
            let professional = &data.professional;
            ProfileInput::ProfessionalInfo(ProfessionalInfoForm {
                media_channel_uuid: prompt::choose(
                    "Media channel",
                    channels,
                    &professional.media_channel_uuid,
                )?,
                position: prompt::text("Position", &professional.position)?,
                years_of_experience: prompt::count(
                    "Years of experience",
                    professional.years_of_experience,
                )?,
            })
        }
        ProfileStep::Biography => {
            let bio = &data.biography;
            ProfileInput::Biography(BiographyForm {
                biography: prompt::text("Biography", &bio.biography)?,
                website: prompt::optional("Website", bio.website.as_deref())?,
                twitter: prompt::optional("Twitter", bio.twitter.as_deref())?,
                linkedin: prompt::optional("LinkedIn", bio.linkedin.as_deref())?,
            })
        }
    })
}
