use iced::widget::{button, column, text, Space};
use iced::Element;

use agesight_core::shared::constants::{AGE_MODEL_NAME, FACE_MODEL_NAME, GENDER_MODEL_NAME};

use crate::app::Message;

pub fn view() -> Element<'static, Message> {
    let version = env!("CARGO_PKG_VERSION");

    column![
        text("Age & Gender Detection PRO").size(22),
        Space::new().height(4),
        text(format!("Version {version}")).size(13),
        Space::new().height(12),
        text(
            "Detects faces in webcam video or still images and estimates the \
             gender and age bracket of each one. All processing runs locally."
        )
        .size(13),
        Space::new().height(12),
        text("Models").size(15),
        text(format!("Face detector: {FACE_MODEL_NAME} (SSD, ResNet-10)")).size(13),
        text(format!("Age classifier: {AGE_MODEL_NAME}")).size(13),
        text(format!("Gender classifier: {GENDER_MODEL_NAME}")).size(13),
        Space::new().height(16),
        button(text("Open models folder").size(13))
            .on_press(Message::OpenModelsFolder)
            .padding([8, 16]),
    ]
    .spacing(0)
    .into()
}
