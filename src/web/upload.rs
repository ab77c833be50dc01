// src/web/upload.rs
use crate::{
    error::{AppError, AppResult},
    models::project::ProjectForm,
};
use axum::{
    body::Bytes,
    extract::{multipart::MultipartError, Multipart},
    http::StatusCode,
};
use std::path::Path;
use uuid::Uuid;

// Prefixo servido pela rota estática /uploads
pub const UPLOAD_URL_PREFIX: &str = "uploads";
const ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp"];

/// Imagem recebida mas ainda não escrita em disco.
/// Só é gravada depois de o formulário ser validado.
#[derive(Debug)]
pub struct PendingImage {
    stored_name: String, // "<uuid>.<ext>", nunca o nome enviado pelo cliente
    data: Bytes,
}

impl PendingImage {
    fn new(extension: &str, data: Bytes) -> AppResult<Self> {
        if data.is_empty() {
            return Err(AppError::Upload("ficheiro de imagem vazio".to_string()));
        }
        Ok(Self {
            stored_name: format!("{}.{}", Uuid::new_v4(), extension),
            data,
        })
    }

    pub fn relative_path(&self) -> String {
        format!("{}/{}", UPLOAD_URL_PREFIX, self.stored_name)
    }

    pub async fn save(&self, upload_dir: &Path) -> AppResult<()> {
        tokio::fs::create_dir_all(upload_dir).await.map_err(|e| {
            tracing::error!("Falha ao criar diretório de uploads {:?}: {}", upload_dir, e);
            AppError::InternalServerError
        })?;

        let dest = upload_dir.join(&self.stored_name);
        tokio::fs::write(&dest, &self.data).await.map_err(|e| {
            tracing::error!("Falha ao gravar imagem em {:?}: {}", dest, e);
            AppError::InternalServerError
        })?;

        tracing::info!("📁 Imagem gravada: {:?} ({} bytes)", dest, self.data.len());
        Ok(())
    }

    /// Remove a imagem gravada quando a operação na DB falha.
    pub async fn discard(&self, upload_dir: &Path) {
        let dest = upload_dir.join(&self.stored_name);
        match tokio::fs::remove_file(&dest).await {
            Ok(()) => tracing::debug!("Imagem descartada: {:?}", dest),
            Err(e) => tracing::warn!("Falha ao remover imagem órfã {:?}: {}", dest, e),
        }
    }
}

/// Resultado do parse de um formulário de projeto multipart.
#[derive(Debug, Default)]
pub struct ProjectUpload {
    pub form: ProjectForm,
    pub image: Option<PendingImage>,
}

impl ProjectUpload {
    /// Caminho a guardar: o do novo ficheiro, senão a imagem atual do formulário de edição.
    /// A imagem atual só é aceite se for um upload gerado por nós.
    pub fn image_path(&self) -> AppResult<Option<String>> {
        if let Some(image) = &self.image {
            return Ok(Some(image.relative_path()));
        }
        match self.form.current_image.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(path) if is_managed_upload_path(path) => Ok(Some(path.to_string())),
            Some(path) => Err(AppError::Validation(format!("imagem atual inválida: '{}'", path))),
        }
    }
}

/// Lê os campos do formulário; a imagem (campo `image`) fica em memória.
pub async fn read_project_form(mut multipart: Multipart) -> AppResult<ProjectUpload> {
    let mut upload = ProjectUpload::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();

        if name == "image" {
            let file_name = field.file_name().unwrap_or_default().to_string();
            let data = field.bytes().await.map_err(multipart_error)?;
            // Input de ficheiro vazio: o browser envia a parte sem nome nem conteúdo
            if file_name.is_empty() && data.is_empty() {
                continue;
            }
            let extension = allowed_extension(&file_name)?;
            upload.image = Some(PendingImage::new(&extension, data)?);
            continue;
        }

        let value = field.text().await.map_err(multipart_error)?;
        match name.as_str() {
            "project_name" => upload.form.project_name = value,
            "description" => upload.form.description = value,
            "start_date" => upload.form.start_date = value,
            "end_date" => upload.form.end_date = value,
            "technologies" => upload.form.technologies.push(value),
            "current_image" => upload.form.current_image = Some(value),
            other => tracing::debug!("Campo de formulário ignorado: {}", other),
        }
    }

    Ok(upload)
}

// Corpo acima do DefaultBodyLimit → 413; o resto é pedido mal formado
fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(e.body_text())
    } else {
        AppError::Upload(e.body_text())
    }
}

fn allowed_extension(file_name: &str) -> AppResult<String> {
    let extension = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    if ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
        Ok(extension)
    } else {
        Err(AppError::Upload(format!("tipo de imagem não suportado: '{}'", file_name)))
    }
}

// Só "uploads/<uuid>.<ext permitida>", sem subdiretórios nem URLs externas
fn is_managed_upload_path(path: &str) -> bool {
    let Some(file_name) = path.strip_prefix(&format!("{}/", UPLOAD_URL_PREFIX)) else {
        return false;
    };
    let Some((stem, extension)) = file_name.rsplit_once('.') else {
        return false;
    };
    stem.len() == 36
        && Uuid::parse_str(stem).is_ok()
        && ALLOWED_EXTENSIONS.contains(&extension)
}

#[cfg(test)]
mod tests {
    use super::*;

    const UPLOADED: &str = "uploads/67e55044-10b1-426f-9247-bb680e5fe0c8.png";

    #[test]
    fn extension_must_be_an_image() {
        assert_eq!(allowed_extension("foto.PNG").unwrap(), "png");
        assert_eq!(allowed_extension("a.b.jpeg").unwrap(), "jpeg");
        assert!(matches!(allowed_extension("script.sh"), Err(AppError::Upload(_))));
        assert!(matches!(allowed_extension("sem_extensao"), Err(AppError::Upload(_))));
    }

    #[tokio::test]
    async fn pending_image_is_written_only_on_save() {
        let dir = tempfile::tempdir().unwrap();
        let image = PendingImage::new("png", Bytes::from_static(b"\x89PNG")).unwrap();
        let path = image.relative_path();

        assert!(path.starts_with("uploads/"));
        assert!(path.ends_with(".png"));
        assert!(is_managed_upload_path(&path));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);

        image.save(dir.path()).await.unwrap();
        let file_name = path.trim_start_matches("uploads/");
        assert_eq!(std::fs::read(dir.path().join(file_name)).unwrap(), b"\x89PNG");

        image.discard(dir.path()).await;
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn empty_image_is_rejected() {
        assert!(matches!(PendingImage::new("png", Bytes::new()), Err(AppError::Upload(_))));
    }

    #[test]
    fn new_file_wins_over_current_image() {
        let mut upload = ProjectUpload::default();
        upload.form.current_image = Some(UPLOADED.into());
        assert_eq!(upload.image_path().unwrap().as_deref(), Some(UPLOADED));

        let image = PendingImage::new("jpg", Bytes::from_static(b"jpg")).unwrap();
        let new_path = image.relative_path();
        upload.image = Some(image);
        assert_eq!(upload.image_path().unwrap(), Some(new_path));

        upload.image = None;
        upload.form.current_image = Some("  ".into());
        assert_eq!(upload.image_path().unwrap(), None);
    }

    #[test]
    fn current_image_must_be_a_generated_upload() {
        for bad in [
            "/evil.example/x.png",
            "//evil.example/x.png",
            "https://evil.example/x.png",
            "uploads/../secret.png",
            "uploads/sub/67e55044-10b1-426f-9247-bb680e5fe0c8.png",
            "uploads/67e55044-10b1-426f-9247-bb680e5fe0c8.sh",
            "uploads/foto.png",
        ] {
            let mut upload = ProjectUpload::default();
            upload.form.current_image = Some(bad.into());
            assert!(
                matches!(upload.image_path(), Err(AppError::Validation(_))),
                "{} devia ser rejeitado",
                bad
            );
        }
    }
}
