/// Stylesheet injected once per page alongside the carousel.
pub const CAROUSEL_CSS: &str = r#"
.carousel {
    margin: 20px auto;
    padding: 10px;
    border: 1px solid #ddd;
    background-color: #fff;
    text-align: center;
    max-width: 90%;
    overflow: hidden;
}

.carousel-inner {
    display: flex;
    gap: 10px;
    overflow-x: auto;
    scroll-behavior: smooth;
}

.carousel-title {
    text-align: left;
    padding-bottom: 20px;
    padding-left: 10px;
}

.product-card {
    flex: 0 0 calc(100% / 6.5);
    background-color: #f9f9f9;
    padding: 10px;
    border: 1px solid #ddd;
    border-radius: 5px;
    text-align: center;
    display: flex;
    flex-direction: column;
    justify-content: space-between;
    height: 350px;
    position: relative;
    box-sizing: border-box;
}

.product-image {
    max-width: 100%;
    height: auto;
    margin-bottom: 10px;
}

.product-name {
    font-size: 16px;
    font-weight: bold;
    margin: 10px 0;
    flex-grow: 1;
}

.product-price {
    font-size: 16px;
    color: blue;
    margin-top: auto;
    font-weight: bold;
}

.favorite-button {
    font-size: 20px;
    cursor: pointer;
    color: #888;
    background: none;
    border: none;
    transition: color 0.3s;
    position: absolute;
    top: 10px;
    right: 10px;
    z-index: 10;
}

.favorite-button.favorited {
    color: blue;
}

.carousel-prev, .carousel-next {
    position: absolute;
    top: 50%;
    transform: translateY(-50%);
    background-color: rgba(0, 0, 0, 0.5);
    border: none;
    color: white;
    font-size: 20px;
    padding: 10px;
    cursor: pointer;
}

.carousel-prev {
    left: 0;
}

.carousel-next {
    right: 0;
}
"#;
